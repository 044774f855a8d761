use alloy_primitives::Address;
use ps_api_types::{Pet, PetId};
use std::rc::Rc;

pub const ADOPT_LABEL: &str = "Adopt Today!";
pub const PROCESSING_LABEL: &str = "Processing...";
pub const ADOPTED_LABEL: &str = "Permanently Adopted";
pub const JUST_ADOPTED_LABEL: &str = "Adopted Successfully! 🎉";
pub const CONNECT_LABEL: &str = "Connect Wallet";
pub const CONNECTED_LABEL: &str = "Wallet Connected";

/// The page surface the controller drives.
///
/// Implementations only render; they never call back into the controller.
pub trait AdoptionView {
    fn clear_catalog(&self);
    fn append_card(&self, id: PetId, pet: &Pet);

    /// `None` clears the account line.
    fn show_account(&self, text: Option<&str>);
    fn set_connect_button(&self, label: &str, enabled: bool);

    fn set_adopt_button(&self, id: PetId, label: &str, enabled: bool);
    /// Shows who claimed the pet, or clears the line for `None`.
    fn set_adopter_info(&self, id: PetId, adopter: Option<Address>);

    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

impl<V: AdoptionView + ?Sized> AdoptionView for Rc<V> {
    fn clear_catalog(&self) {
        (**self).clear_catalog()
    }

    fn append_card(&self, id: PetId, pet: &Pet) {
        (**self).append_card(id, pet)
    }

    fn show_account(&self, text: Option<&str>) {
        (**self).show_account(text)
    }

    fn set_connect_button(&self, label: &str, enabled: bool) {
        (**self).set_connect_button(label, enabled)
    }

    fn set_adopt_button(&self, id: PetId, label: &str, enabled: bool) {
        (**self).set_adopt_button(id, label, enabled)
    }

    fn set_adopter_info(&self, id: PetId, adopter: Option<Address>) {
        (**self).set_adopter_info(id, adopter)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn confirm(&self, message: &str) -> bool {
        (**self).confirm(message)
    }
}
