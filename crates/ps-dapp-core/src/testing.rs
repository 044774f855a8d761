use alloy_primitives::Address;
use ps_api_types::{Pet, PetId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::view::AdoptionView;

/// Records what the controller rendered so tests can assert on it.
pub struct RecordingView {
    cards: RefCell<Vec<(PetId, &'static str)>>,
    buttons: RefCell<HashMap<PetId, (String, bool)>>,
    adopters: RefCell<HashMap<PetId, Option<Address>>>,
    account: RefCell<Option<String>>,
    connect: RefCell<(String, bool)>,
    connect_history: RefCell<Vec<(String, bool)>>,
    alerts: RefCell<Vec<String>>,
    confirms: RefCell<Vec<String>>,
    confirm_answer: Cell<bool>,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            cards: RefCell::default(),
            buttons: RefCell::default(),
            adopters: RefCell::default(),
            account: RefCell::default(),
            connect: RefCell::new((crate::view::CONNECT_LABEL.to_owned(), true)),
            connect_history: RefCell::default(),
            alerts: RefCell::default(),
            confirms: RefCell::default(),
            confirm_answer: Cell::new(true),
        }
    }
}

impl RecordingView {
    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn cards(&self) -> Vec<(PetId, &'static str)> {
        self.cards.borrow().clone()
    }

    pub fn button(&self, id: PetId) -> (String, bool) {
        self.buttons.borrow().get(&id).cloned().unwrap_or_default()
    }

    pub fn adopter(&self, id: PetId) -> Option<Address> {
        self.adopters.borrow().get(&id).copied().flatten()
    }

    pub fn account(&self) -> Option<String> {
        self.account.borrow().clone()
    }

    pub fn connect_button(&self) -> (String, bool) {
        self.connect.borrow().clone()
    }

    /// Every connect button state set so far, oldest first.
    pub fn connect_history(&self) -> Vec<(String, bool)> {
        self.connect_history.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn confirms(&self) -> usize {
        self.confirms.borrow().len()
    }
}

impl AdoptionView for RecordingView {
    fn clear_catalog(&self) {
        self.cards.borrow_mut().clear();
        self.buttons.borrow_mut().clear();
        self.adopters.borrow_mut().clear();
    }

    fn append_card(&self, id: PetId, pet: &Pet) {
        self.cards.borrow_mut().push((id, pet.name));
    }

    fn show_account(&self, text: Option<&str>) {
        *self.account.borrow_mut() = text.map(str::to_owned);
    }

    fn set_connect_button(&self, label: &str, enabled: bool) {
        *self.connect.borrow_mut() = (label.to_owned(), enabled);
        self.connect_history
            .borrow_mut()
            .push((label.to_owned(), enabled));
    }

    fn set_adopt_button(&self, id: PetId, label: &str, enabled: bool) {
        self.buttons
            .borrow_mut()
            .insert(id, (label.to_owned(), enabled));
    }

    fn set_adopter_info(&self, id: PetId, adopter: Option<Address>) {
        self.adopters.borrow_mut().insert(id, adopter);
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_owned());
        self.confirm_answer.get()
    }
}
