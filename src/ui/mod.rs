/// Presentation layer: top bar, slice side panel, dashboard sections.
pub mod panels;
pub mod sections;
