use chromalab_palette::{CatalogColor, ColorRegistry, Rgb, WheelRelations};

use crate::saved_colors::{SaveError, SavedColor, SavedColors};
use crate::store::KeyValueStore;

use super::blend::{mix, Mix, GENERIC_BLEND_NAME};

/// Notice shown instead of a blend when both slots hold the same color.
pub const SAME_COLOR_NOTICE: &str = "같은 색이에요!";

const DEFAULT_RATIO: f64 = 0.5;

/// Interactive mixing workspace: two ingredient slots, a blend ratio and the
/// user's saved color list.
///
/// The blend itself is derived state, recomputed from the slots and ratio on
/// every call to [`MixSession::result`].
pub struct MixSession {
    registry: ColorRegistry,
    slots: [Option<CatalogColor>; 2],
    ratio: f64,
    saved: SavedColors,
}

impl MixSession {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        MixSession {
            registry: ColorRegistry::new(),
            slots: [None, None],
            ratio: DEFAULT_RATIO,
            saved: SavedColors::load(store),
        }
    }

    pub fn registry(&self) -> &ColorRegistry {
        &self.registry
    }

    pub fn slots(&self) -> [Option<&CatalogColor>; 2] {
        [self.slots[0].as_ref(), self.slots[1].as_ref()]
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Put the mixing color with `rgb` into a slot.
    ///
    /// Selecting a color that already occupies a slot changes nothing, not
    /// even the ratio. Otherwise the ratio resets to an even split and the
    /// color lands in the first free slot; with both slots full the older
    /// ingredient is evicted and the newer one shifts down to make room.
    pub fn select_color(&mut self, rgb: Rgb) {
        let color = match self.registry.mixing_colors().into_iter().find(|c| c.rgb == rgb) {
            Some(color) => color.clone(),
            None => {
                log::warn!("ignoring selection of unknown color {}", rgb);
                return;
            }
        };

        if self.slots.iter().flatten().any(|c| c.rgb == rgb) {
            return;
        }

        self.ratio = DEFAULT_RATIO;
        if self.slots[0].is_none() {
            self.slots[0] = Some(color);
        } else if self.slots[1].is_none() {
            self.slots[1] = Some(color);
        } else {
            self.slots[0] = self.slots[1].take();
            self.slots[1] = Some(color);
        }
    }

    /// Set the blend ratio, clamped to [0.0, 1.0].
    pub fn set_ratio(&mut self, ratio: f64) {
        self.ratio = ratio.clamp(0.0, 1.0);
    }

    /// Empty one slot and reset the ratio. A color left in the second slot
    /// moves up so a lone ingredient always sits in the first slot.
    pub fn clear_slot(&mut self, index: usize) {
        if index > 1 {
            log::warn!("ignoring clear of slot {}", index);
            return;
        }
        self.slots[index] = None;
        if self.slots[0].is_none() {
            self.slots[0] = self.slots[1].take();
        }
        self.ratio = DEFAULT_RATIO;
    }

    /// Empty both slots and reset the ratio.
    pub fn undo(&mut self) {
        self.slots = [None, None];
        self.ratio = DEFAULT_RATIO;
    }

    /// The current mix, if both slots are filled.
    pub fn result(&self) -> Option<Mix> {
        match (&self.slots[0], &self.slots[1]) {
            (Some(first), Some(second)) => Some(mix(&self.registry, first, second, self.ratio)),
            _ => None,
        }
    }

    /// Notice for the degenerate case of both slots holding the same color.
    pub fn notice(&self) -> Option<&'static str> {
        match (&self.slots[0], &self.slots[1]) {
            (Some(first), Some(second)) if first.rgb == second.rgb => Some(SAME_COLOR_NOTICE),
            _ => None,
        }
    }

    /// Name suggestion for the save dialog, when the blend earned one of the
    /// descriptive names.
    pub fn suggested_name(&self) -> Option<String> {
        match self.result()? {
            Mix::Blended(color) if color.name != GENERIC_BLEND_NAME => Some(color.name),
            _ => None,
        }
    }

    /// Wheel neighbours and opposite of the first ingredient, for hinting.
    pub fn relation_hints(&self) -> Option<WheelRelations<'_>> {
        let first = self.slots[0].as_ref()?;
        self.registry.relations(first.rgb)
    }

    /// Save the current blend to the personal list under `custom_name`.
    ///
    /// Only genuine blends can be saved; an empty mixer or a same-color
    /// pass-through is rejected.
    pub fn save_result(&mut self, custom_name: &str) -> Result<&SavedColor, SaveError> {
        match self.result() {
            Some(Mix::Blended(color)) => self.saved.save(custom_name, &color.name, color.rgb),
            _ => Err(SaveError::NothingToSave),
        }
    }

    pub fn delete_saved(&mut self, id: &str) -> bool {
        self.saved.delete(id)
    }

    pub fn saved(&self) -> &[SavedColor] {
        self.saved.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session() -> MixSession {
        MixSession::new(Box::new(MemoryStore::new()))
    }

    fn rgb_of(session: &MixSession, code: &str) -> Rgb {
        session.registry().find_by_code(code).unwrap().rgb
    }

    #[test]
    fn test_select_fills_slots_in_order() {
        let mut session = session();
        let red = rgb_of(&session, "5R");
        let yellow = rgb_of(&session, "5Y");

        session.select_color(red);
        assert_eq!(session.slots()[0].unwrap().rgb, red);
        assert!(session.slots()[1].is_none());

        session.select_color(yellow);
        assert_eq!(session.slots()[0].unwrap().rgb, red);
        assert_eq!(session.slots()[1].unwrap().rgb, yellow);
    }

    #[test]
    fn test_reselecting_a_slotted_color_changes_nothing() {
        let mut session = session();
        let red = rgb_of(&session, "5R");
        let yellow = rgb_of(&session, "5Y");

        session.select_color(red);
        session.select_color(yellow);
        session.set_ratio(0.8);

        session.select_color(red);
        assert_eq!(session.slots()[0].unwrap().rgb, red);
        assert_eq!(session.slots()[1].unwrap().rgb, yellow);
        assert_eq!(session.ratio(), 0.8);
    }

    #[test]
    fn test_third_selection_evicts_the_oldest() {
        let mut session = session();
        let red = rgb_of(&session, "5R");
        let yellow = rgb_of(&session, "5Y");
        let blue = rgb_of(&session, "5B");

        session.select_color(red);
        session.select_color(yellow);
        session.select_color(blue);

        assert_eq!(session.slots()[0].unwrap().rgb, yellow);
        assert_eq!(session.slots()[1].unwrap().rgb, blue);
    }

    #[test]
    fn test_selection_resets_the_ratio() {
        let mut session = session();
        session.select_color(rgb_of(&session, "5R"));
        session.set_ratio(0.8);
        session.select_color(rgb_of(&session, "5Y"));
        assert_eq!(session.ratio(), 0.5);
    }

    #[test]
    fn test_unknown_color_is_ignored() {
        let mut session = session();
        session.select_color(Rgb::new(1, 2, 3));
        assert!(session.slots()[0].is_none());

        // Gray is in the catalog but not offered for mixing.
        session.select_color(Rgb::new(0x7a, 0x7a, 0x7a));
        assert!(session.slots()[0].is_none());
    }

    #[test]
    fn test_clear_slot_moves_remaining_color_up() {
        let mut session = session();
        let red = rgb_of(&session, "5R");
        let yellow = rgb_of(&session, "5Y");

        session.select_color(red);
        session.select_color(yellow);
        session.set_ratio(0.9);

        session.clear_slot(0);
        assert_eq!(session.slots()[0].unwrap().rgb, yellow);
        assert!(session.slots()[1].is_none());
        assert_eq!(session.ratio(), 0.5);
    }

    #[test]
    fn test_clear_second_slot() {
        let mut session = session();
        session.select_color(rgb_of(&session, "5R"));
        session.select_color(rgb_of(&session, "5Y"));

        session.clear_slot(1);
        assert!(session.slots()[0].is_some());
        assert!(session.slots()[1].is_none());
    }

    #[test]
    fn test_undo_empties_the_mixer() {
        let mut session = session();
        session.select_color(rgb_of(&session, "5R"));
        session.select_color(rgb_of(&session, "5Y"));
        session.set_ratio(0.7);

        session.undo();
        assert_eq!(session.slots(), [None, None]);
        assert_eq!(session.ratio(), 0.5);
        assert!(session.result().is_none());
    }

    #[test]
    fn test_result_tracks_the_ratio() {
        let mut session = session();
        let red = rgb_of(&session, "5R");
        let yellow = rgb_of(&session, "5Y");

        session.select_color(red);
        assert!(session.result().is_none());
        session.select_color(yellow);

        assert_eq!(session.result().unwrap().rgb(), Rgb::new(247, 143, 44));
        session.set_ratio(0.0);
        assert_eq!(session.result().unwrap().rgb(), red);
        session.set_ratio(1.0);
        assert_eq!(session.result().unwrap().rgb(), yellow);
    }

    #[test]
    fn test_notice_is_absent_in_normal_use() {
        let mut session = session();
        assert!(session.notice().is_none());
        session.select_color(rgb_of(&session, "5R"));
        session.select_color(rgb_of(&session, "5R"));
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_suggested_name_only_for_descriptive_blends() {
        let mut session = session();
        session.select_color(rgb_of(&session, "5R"));
        session.select_color(Rgb::new(255, 255, 255));
        assert_eq!(session.suggested_name().unwrap(), "밝은 빨강");

        session.undo();
        session.select_color(rgb_of(&session, "5R"));
        session.select_color(rgb_of(&session, "5Y"));
        assert!(session.suggested_name().is_none());
    }

    #[test]
    fn test_relation_hints_follow_the_first_slot() {
        let mut session = session();
        session.select_color(rgb_of(&session, "5R"));

        let hints = session.relation_hints().unwrap();
        assert_eq!(hints.similar[0].code, "5RP");
        assert_eq!(hints.similar[1].code, "5YR");
        assert_eq!(hints.opposite.code, "5BG");
    }

    #[test]
    fn test_relation_hints_absent_for_neutrals() {
        let mut session = session();
        session.select_color(Rgb::new(255, 255, 255));
        assert!(session.relation_hints().is_none());
    }

    #[test]
    fn test_save_result_round_trip() {
        let mut session = session();
        session.select_color(rgb_of(&session, "5R"));
        session.select_color(rgb_of(&session, "5Y"));

        let entry = session.save_result("노을").unwrap();
        assert_eq!(entry.custom_name, "노을");
        assert_eq!(entry.rgb, Rgb::new(247, 143, 44));

        let id = session.saved()[0].id.clone();
        assert!(session.delete_saved(&id));
        assert!(session.saved().is_empty());
    }

    #[test]
    fn test_save_requires_a_blend() {
        let mut session = session();
        assert!(matches!(
            session.save_result("노을"),
            Err(SaveError::NothingToSave)
        ));

        session.select_color(rgb_of(&session, "5R"));
        assert!(matches!(
            session.save_result("노을"),
            Err(SaveError::NothingToSave)
        ));
    }

    #[test]
    fn test_save_rejects_duplicate_names() {
        let mut session = session();
        session.select_color(rgb_of(&session, "5R"));
        session.select_color(rgb_of(&session, "5Y"));
        session.save_result("노을").unwrap();

        session.set_ratio(0.3);
        assert!(matches!(
            session.save_result("노을"),
            Err(SaveError::DuplicateName(_))
        ));
    }
}
