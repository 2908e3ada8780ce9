/// Identifies records that expose a stable numeric identifier.
pub trait Identifiable {
    fn id(&self) -> i64;
}

/// Provides access to a human-friendly record name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Visual tokens supplied by the backend and carried through untouched.
pub trait Decorated {
    fn icon(&self) -> &str;
    fn color(&self) -> &str;
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
pub use serde;
