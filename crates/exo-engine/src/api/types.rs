/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A command for the HTML overlay, produced by viewer logic and applied
/// by the web bridge after the frame is built.
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Fill the info panel and make it visible.
    ShowInfo { title: String, details: String },
    /// Hide the info panel.
    HideInfo,
}
