//! Session collaborators: the live connection behind a tab and the factory
//! that builds capture manager sessions.

use anyhow::Result;

/// The live session shown in a tab.
///
/// Implementations own the protocol and the rendered view; the controller
/// only drives the lifecycle calls below.
pub trait Connection {
    /// Open the session.
    fn connect(&mut self) -> Result<()>;

    /// Close the session and release its resources.
    fn disconnect(&mut self);

    /// Whether the session is currently open.
    fn is_connected(&self) -> bool;

    /// Reload whatever the view displays.
    fn refresh_view(&mut self) {}

    /// Raise the session's view above its siblings.
    fn bring_to_front(&mut self) {}

    /// Force a repaint of the session's view.
    fn redraw(&mut self) {}
}

/// Builds the session shown in the capture manager tab.
pub trait CaptureSessionFactory {
    fn create(&mut self) -> Result<Box<dyn Connection>>;
}

impl<F> CaptureSessionFactory for F
where
    F: FnMut() -> Result<Box<dyn Connection>>,
{
    fn create(&mut self) -> Result<Box<dyn Connection>> {
        self()
    }
}
