use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{LandingPage, ViewportPane};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Draw one frame: the landing page until the first resize, then the reader
/// stacked above the note list.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    if !app.is_ready() {
        LandingPage::new().render(frame, frame.area());
        return;
    }

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(app.reader.height), Length(app.list.height), Min(0)]);
    let [reader_area, list_area, _rest] = layout.areas(frame.area());

    ViewportPane::new(&app.reader).render(frame, reader_area);
    ViewportPane::new(&app.list).render(frame, list_area);
}
