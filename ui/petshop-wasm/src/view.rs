//! [`AdoptionView`] over the real page.

use crate::dom::{self, Elements};
use alloy_primitives::Address;
use gloo_utils::window;
use ps_api_types::{Pet, PetId, short_address};
use ps_dapp_core::AdoptionView;
use tracing::warn;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300.png?text=Pet+";

pub struct PageView {
    els: Elements,
}

impl PageView {
    pub fn new(els: Elements) -> Self {
        Self { els }
    }
}

fn card_html(id: PetId, pet: &Pet) -> String {
    let index = id.index();
    format!(
        r#"<img class="pet-image" src="images/pet-{index}.jpeg" alt="{name}" onerror="this.src='{PLACEHOLDER_IMAGE}{number}'">
<div class="pet-name">{name}</div>
<div class="pet-breed">{breed}</div>
<div class="pet-age">Approx. Age: {age}</div>
<div class="adopter-info" data-adopter-id="{index}"></div>
<button class="adopt-btn" data-id="{index}"></button>"#,
        name = pet.name,
        breed = pet.breed,
        age = pet.age,
        number = index + 1,
    )
}

impl AdoptionView for PageView {
    fn clear_catalog(&self) {
        self.els.pets_row.set_inner_html("");
    }

    fn append_card(&self, id: PetId, pet: &Pet) {
        let card = match dom::create("div", "pet-card") {
            Ok(card) => card,
            Err(err) => {
                warn!(pet = id.index(), ?err, "could not create pet card");
                return;
            }
        };
        card.set_inner_html(&card_html(id, pet));
        if let Err(err) = self.els.pets_row.append_child(&card) {
            warn!(pet = id.index(), ?err, "could not attach pet card");
        }
    }

    fn show_account(&self, text: Option<&str>) {
        dom::set_text(&self.els.account_display, text.unwrap_or_default());
    }

    fn set_connect_button(&self, label: &str, enabled: bool) {
        dom::set_button(&self.els.connect_button, label, enabled);
    }

    fn set_adopt_button(&self, id: PetId, label: &str, enabled: bool) {
        if let Some(btn) = dom::adopt_button(id.index()) {
            dom::set_button(&btn, label, enabled);
        }
    }

    fn set_adopter_info(&self, id: PetId, adopter: Option<Address>) {
        let Some(info) = dom::adopter_info(id.index()) else {
            return;
        };
        match adopter {
            Some(adopter) => {
                let full = adopter.to_string();
                let short = short_address(&full);
                info.set_inner_html(&format!(
                    r#"<div class="adopted-by">Claimed by: <span class="wallet-address-small">{short}</span></div>"#
                ));
                if let Err(err) = info.set_attribute("title", &full) {
                    warn!(pet = id.index(), ?err, "could not set adopter title");
                }
            }
            None => {
                info.set_inner_html("");
                if let Err(err) = info.remove_attribute("title") {
                    warn!(pet = id.index(), ?err, "could not clear adopter title");
                }
            }
        }
    }

    fn alert(&self, message: &str) {
        if let Err(err) = window().alert_with_message(message) {
            warn!(?err, "alert failed");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        window().confirm_with_message(message).unwrap_or(false)
    }
}
