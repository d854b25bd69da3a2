mod native;

pub use native::NativeProvider;
