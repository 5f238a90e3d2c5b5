//! Cross-platform save-file discovery engine, exposed to the Flutter
//! shell via `flutter_rust_bridge`.

pub mod api;
pub mod config;
pub mod emulators;
pub mod finder;
