use ps_api_types::{PET_COUNT, Pet, PetId};

use crate::view::AdoptionView;

/// Pets on offer, one per contract slot, in slot order.
pub const CATALOG: [Pet; PET_COUNT] = [
    Pet {
        name: "Apollo",
        breed: "Siberian Husky",
        age: "2 years",
    },
    Pet {
        name: "Luna",
        breed: "Cocker Spaniel",
        age: "1 year",
    },
    Pet {
        name: "Rex",
        breed: "German Shepherd",
        age: "4 years",
    },
    Pet {
        name: "Daisy",
        breed: "Beagle",
        age: "6 months",
    },
    Pet {
        name: "Ziggy",
        breed: "Poodle (Toy)",
        age: "3 months",
    },
    Pet {
        name: "Nova",
        breed: "Rottweiler",
        age: "3 years",
    },
    Pet {
        name: "Finn",
        breed: "Dachshund",
        age: "2 years",
    },
    Pet {
        name: "Willow",
        breed: "Shih Tzu",
        age: "5 years",
    },
    Pet {
        name: "Kobe",
        breed: "Labrador Retriever",
        age: "1 year",
    },
    Pet {
        name: "Zoe",
        breed: "Corgi",
        age: "2 years",
    },
    Pet {
        name: "Milo",
        breed: "Pomeranian",
        age: "8 months",
    },
    Pet {
        name: "Skye",
        breed: "Border Collie",
        age: "4 years",
    },
    Pet {
        name: "Bear",
        breed: "Great Dane",
        age: "3 years",
    },
    Pet {
        name: "Nala",
        breed: "Samoyed",
        age: "2 years",
    },
    Pet {
        name: "Jasper",
        breed: "Chow Chow",
        age: "3 months",
    },
    Pet {
        name: "Ollie",
        breed: "Boston Terrier",
        age: "1 year",
    },
];

pub fn pet(id: PetId) -> &'static Pet {
    &CATALOG[id.index()]
}

/// Replaces the container contents with one card per catalog entry.
/// Adopt buttons start disabled; they are enabled once a wallet session
/// exists and the slot is known to be free.
pub fn render_catalog<V: AdoptionView + ?Sized>(view: &V) {
    view.clear_catalog();
    for id in PetId::all() {
        view.append_card(id, pet(id));
        view.set_adopt_button(id, crate::view::ADOPT_LABEL, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingView;

    #[test]
    fn renders_one_card_per_pet_in_order() {
        let view = RecordingView::default();
        render_catalog(&view);

        let cards = view.cards();
        assert_eq!(cards.len(), PET_COUNT);
        for (index, (id, name)) in cards.iter().enumerate() {
            assert_eq!(id.index(), index);
            assert_eq!(*name, CATALOG[index].name);
        }
        assert_eq!(cards[0].1, "Apollo");
        assert_eq!(cards[15].1, "Ollie");
    }

    #[test]
    fn rerender_does_not_duplicate_cards() {
        let view = RecordingView::default();
        render_catalog(&view);
        render_catalog(&view);
        assert_eq!(view.cards().len(), PET_COUNT);
    }

    #[test]
    fn adopt_buttons_start_disabled() {
        let view = RecordingView::default();
        render_catalog(&view);
        assert!(PetId::all().all(|id| !view.button(id).1));
    }
}
