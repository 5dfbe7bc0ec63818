use crate::surface::Surface;
use crate::types::ModalId;
use std::collections::HashSet;

/// Where a click inside a modal overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop around the panel.
    Backdrop,
    /// The panel itself.
    Content,
}

/// Tracks which overlays are shown.
#[derive(Debug, Default)]
pub struct ModalController {
    visible: HashSet<ModalId>,
}

impl ModalController {
    pub fn show<S: Surface + ?Sized>(&mut self, surface: &mut S, modal: ModalId) {
        tracing::debug!(modal = %modal, "modal shown");
        self.visible.insert(modal);
        surface.set_modal_visible(modal, true);
    }

    pub fn hide<S: Surface + ?Sized>(&mut self, surface: &mut S, modal: ModalId) {
        if self.visible.remove(&modal) {
            tracing::debug!(modal = %modal, "modal hidden");
        }
        surface.set_modal_visible(modal, false);
    }

    /// Fill the success modal and show it.
    pub fn show_success<S: Surface + ?Sized>(&mut self, surface: &mut S, title: &str, message: &str) {
        surface.set_success_content(title, message);
        self.show(surface, ModalId::Success);
    }

    /// Handle a click on an overlay. A backdrop click closes that modal; a
    /// click on its content is ignored. Returns whether the modal closed.
    pub fn click<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        modal: ModalId,
        target: ClickTarget,
    ) -> bool {
        if target != ClickTarget::Backdrop || !self.is_visible(modal) {
            return false;
        }
        self.hide(surface, modal);
        true
    }

    pub fn is_visible(&self, modal: ModalId) -> bool {
        self.visible.contains(&modal)
    }
}
