//! Name-keyed registration table for characters and cards.
//!
//! The engine never discovers content on its own. Callers build a
//! `Catalog` at startup (usually [`Catalog::standard`]) and hand it to the
//! match builder and the engine, which look entries up by name when
//! building rosters and decks and when delayed effects insert cards.

use rustc_hash::FxHashMap;

use crate::cards::CardKind;
use crate::characters::{Character, CharacterKind};

/// Builds a fresh character with default stats.
pub type CharacterFactory = fn() -> Character;

/// Builds a card.
pub type CardFactory = fn() -> CardKind;

/// Registry of playable characters and cards.
///
/// ## Example
///
/// ```
/// use lingcard::catalog::Catalog;
/// use lingcard::cards::CardKind;
///
/// let catalog = Catalog::standard();
/// assert_eq!(catalog.card("SharpSlash"), Some(CardKind::SharpSlash));
/// assert_eq!(catalog.character("Jun").unwrap().current_hp(), 10);
/// assert!(catalog.card("Fireball").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    characters: FxHashMap<String, CharacterFactory>,
    cards: FxHashMap<String, CardFactory>,
}

impl Catalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in character and card, under its display name.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register_character("Cafe", || Character::new(CharacterKind::Cafe));
        catalog.register_character("Jun", || Character::new(CharacterKind::Jun));
        catalog.register_character("Liuli", || Character::new(CharacterKind::Liuli));
        catalog.register_character("Xinhe", || Character::new(CharacterKind::Xinhe));
        catalog.register_character("Yangguang", || Character::new(CharacterKind::Yangguang));

        catalog.register_card("Attack", || CardKind::Attack);
        catalog.register_card("Heal", || CardKind::Heal);
        catalog.register_card("Defend", || CardKind::Defend);
        catalog.register_card("Poison", || CardKind::Poison);
        catalog.register_card("DrawTest", || CardKind::DrawTest);
        catalog.register_card("SharpSlash", || CardKind::SharpSlash);
        catalog.register_card("SlidingBlade", || CardKind::SlidingBlade);
        catalog.register_card("ThornsSlash", || CardKind::ThornsSlash);
        catalog.register_card("DrawSwordSlash", || CardKind::DrawSwordSlash);
        catalog.register_card("WheelSlash", || CardKind::WheelSlash);
        catalog.register_card("SwordEdgeTurn", || CardKind::SwordEdgeTurn);
        catalog.register_card("RemoveScars", || CardKind::RemoveScars);
        catalog.register_card("ReforgeWoodenSword", || CardKind::ReforgeWoodenSword);
        catalog.register_card("ReforgeCrudeIron", || CardKind::ReforgeCrudeIron);
        catalog.register_card("ReforgeFamousBlade", || CardKind::ReforgeFamousBlade);
        catalog.register_card("ReforgeDemonBlade", || CardKind::ReforgeDemonBlade);
        catalog.register_card("ReforgeMagicBlade", || CardKind::ReforgeMagicBlade);
        catalog.register_card("LiberationMagicBlade", || CardKind::LiberationMagicBlade);
        catalog.register_card("BlazingSun", || CardKind::BlazingSun);
        catalog
    }

    /// Register a character factory. A later registration under the same
    /// name replaces the earlier one.
    pub fn register_character(&mut self, name: impl Into<String>, factory: CharacterFactory) {
        self.characters.insert(name.into(), factory);
    }

    /// Register a card factory, replacing any earlier one of the same name.
    pub fn register_card(&mut self, name: impl Into<String>, factory: CardFactory) {
        self.cards.insert(name.into(), factory);
    }

    /// A freshly constructed character, if `name` is registered.
    #[must_use]
    pub fn character(&self, name: &str) -> Option<Character> {
        self.characters.get(name).map(|factory| factory())
    }

    #[must_use]
    pub fn card(&self, name: &str) -> Option<CardKind> {
        self.cards.get(name).map(|factory| factory())
    }

    /// Registered character names, sorted.
    #[must_use]
    pub fn character_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.characters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered card names, sorted.
    #[must_use]
    pub fn card_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.cards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
