use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::state::{AppState, InputMode, OpState};

/// What: Handle a mouse event in Normal mode.
///
/// Details:
/// - The wheel moves the selection by one row.
/// - A left click on table row `y` selects visible row `y - 1 + offset`
///   (line 0 is the header).
/// - Clicks are ignored while the detail panel is open, since the drawn
///   table is then shorter than the viewport and may be shifted.
/// - Ignored in input modes and while a confirmation is pending.
pub(super) fn handle_mouse(me: MouseEvent, app: &mut AppState) {
    if app.mode != InputMode::Normal || matches!(app.op, OpState::PendingConfirm(_)) {
        return;
    }
    let vp = &mut app.viewport;
    match me.kind {
        MouseEventKind::ScrollDown => vp.select_next(),
        MouseEventKind::ScrollUp => vp.select_prev(),
        MouseEventKind::Down(MouseButton::Left) if !app.show_detail => {
            let Some(line) = usize::from(me.row).checked_sub(1) else {
                return;
            };
            if vp.height > 0 && line >= vp.height {
                return;
            }
            vp.select_index(line + vp.offset);
        }
        _ => {}
    }
}
