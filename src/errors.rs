mod provide;

pub use provide::ProvideErrorKind;
