//! Preset management: the set of anchor presets and the active selection.
//!
//! Persistence is injected through [`PresetStore`]; the manager never
//! touches disk or network itself. Consumers that cache grids or
//! identifiers subscribe with [`PresetManager::on_anchor_change`] and
//! re-request from the pure build functions when notified — there is no
//! implicit reactivity.

use chrono::NaiveDate;

use crate::anchor::{validate_name, AnchorPreset};
use crate::error::{SolcalError, SolcalResult};

/// Name of the fallback preset created when the store is empty and used
/// when the active preset is deleted.
pub const DEFAULT_PRESET_NAME: &str = "default";

fn default_start_date() -> NaiveDate {
    // 2020-01-01; documented in the preset file the CLI writes.
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("default start date is a valid date")
}

/// Persistence seam for anchor presets.
///
/// Implementations are external collaborators (a toml file, a managed
/// backend, an in-memory map in tests). Best-effort and eventually
/// consistent is fine; the manager keeps its own authoritative copy.
pub trait PresetStore {
    fn load(&self) -> SolcalResult<Vec<AnchorPreset>>;
    fn save(&mut self, preset: &AnchorPreset) -> SolcalResult<()>;
    fn remove(&mut self, id: &str) -> SolcalResult<()>;
}

/// Fields of a preset that [`PresetManager::update`] may change.
#[derive(Debug, Clone, Default)]
pub struct PresetPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
}

type AnchorListener = Box<dyn Fn(&AnchorPreset)>;

/// Owns the preset list and the single active-anchor selection.
///
/// The only mutable state in the engine. Writes take `&mut self`; callers
/// that share a manager across threads arrange their own single-writer
/// discipline.
pub struct PresetManager<S: PresetStore> {
    store: S,
    presets: Vec<AnchorPreset>,
    active_id: String,
    listeners: Vec<AnchorListener>,
}

impl<S: PresetStore> PresetManager<S> {
    /// Loads presets from the store, creating and saving the default
    /// preset if the store is empty. The default preset (or the first
    /// stored one, if no preset carries the default name) becomes active.
    pub fn load(mut store: S) -> SolcalResult<Self> {
        let mut presets = store.load()?;
        if presets.is_empty() {
            let preset = AnchorPreset::new(DEFAULT_PRESET_NAME, default_start_date())?;
            store.save(&preset)?;
            presets.push(preset);
        }

        let active_id = presets
            .iter()
            .find(|p| p.name == DEFAULT_PRESET_NAME)
            .unwrap_or(&presets[0])
            .id
            .clone();

        Ok(PresetManager {
            store,
            presets,
            active_id,
            listeners: Vec::new(),
        })
    }

    /// Returns the currently active anchor. Never absent: the manager
    /// guarantees at least one preset exists and one of them is selected.
    pub fn active(&self) -> &AnchorPreset {
        self.presets
            .iter()
            .find(|p| p.id == self.active_id)
            .expect("active preset always exists")
    }

    /// All presets, in load/creation order.
    pub fn presets(&self) -> &[AnchorPreset] {
        &self.presets
    }

    /// Access to the underlying store, for store-specific features such as
    /// persisting the active selection across sessions.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Looks a preset up by name.
    pub fn find_by_name(&self, name: &str) -> Option<&AnchorPreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    /// Registers a callback invoked with the new active anchor whenever
    /// the selection changes (including changes caused by delete fallback
    /// and edits to the active preset).
    pub fn on_anchor_change(&mut self, listener: impl Fn(&AnchorPreset) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Creates and persists a new preset.
    ///
    /// # Errors
    ///
    /// Returns [`SolcalError::Validation`] if the name is empty or already
    /// taken.
    pub fn create(&mut self, name: &str, start_date: NaiveDate) -> SolcalResult<&AnchorPreset> {
        let name = validate_name(name)?;
        self.ensure_name_free(&name, None)?;

        let preset = AnchorPreset::new(&name, start_date)?;
        self.store.save(&preset)?;
        self.presets.push(preset);
        Ok(self.presets.last().expect("preset was just pushed"))
    }

    /// Makes the preset with the given id the active anchor and notifies
    /// subscribers. Previously derived grids and identifiers are stale
    /// from this point and must be re-requested.
    ///
    /// # Errors
    ///
    /// Returns [`SolcalError::NotFound`] for an unknown id.
    pub fn select(&mut self, id: &str) -> SolcalResult<()> {
        if !self.presets.iter().any(|p| p.id == id) {
            return Err(SolcalError::NotFound(id.to_string()));
        }
        self.active_id = id.to_string();
        self.notify();
        Ok(())
    }

    /// Applies a patch to a preset and persists it. Editing the active
    /// preset notifies subscribers, since the anchor value changed.
    pub fn update(&mut self, id: &str, patch: PresetPatch) -> SolcalResult<()> {
        let index = self
            .presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SolcalError::NotFound(id.to_string()))?;

        if let Some(name) = &patch.name {
            let name = validate_name(name)?;
            self.ensure_name_free(&name, Some(id))?;
            self.presets[index].name = name;
        }
        if let Some(start_date) = patch.start_date {
            self.presets[index].start_date = start_date;
        }

        self.store.save(&self.presets[index])?;
        if self.active_id == id {
            self.notify();
        }
        Ok(())
    }

    /// Deletes a preset. Deleting the active preset falls back to the
    /// default preset, recreating it if it no longer exists, so that
    /// [`PresetManager::active`] keeps its never-absent guarantee.
    pub fn delete(&mut self, id: &str) -> SolcalResult<()> {
        let index = self
            .presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SolcalError::NotFound(id.to_string()))?;

        self.store.remove(id)?;
        let was_active = self.active_id == id;
        self.presets.remove(index);

        if was_active {
            let fallback_id = match self.find_by_name(DEFAULT_PRESET_NAME) {
                Some(preset) => preset.id.clone(),
                None => {
                    let preset = AnchorPreset::new(DEFAULT_PRESET_NAME, default_start_date())?;
                    self.store.save(&preset)?;
                    let id = preset.id.clone();
                    self.presets.push(preset);
                    id
                }
            };
            self.active_id = fallback_id;
            self.notify();
        }
        Ok(())
    }

    fn ensure_name_free(&self, name: &str, ignore_id: Option<&str>) -> SolcalResult<()> {
        let taken = self
            .presets
            .iter()
            .any(|p| p.name == name && Some(p.id.as_str()) != ignore_id);
        if taken {
            return Err(SolcalError::Validation(format!(
                "a preset named '{name}' already exists"
            )));
        }
        Ok(())
    }

    fn notify(&self) {
        let active = self.active();
        for listener in &self.listeners {
            listener(active);
        }
    }
}

/// In-memory store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    presets: Vec<AnchorPreset>,
}

impl PresetStore for MemoryPresetStore {
    fn load(&self) -> SolcalResult<Vec<AnchorPreset>> {
        Ok(self.presets.clone())
    }

    fn save(&mut self, preset: &AnchorPreset) -> SolcalResult<()> {
        match self.presets.iter_mut().find(|p| p.id == preset.id) {
            Some(existing) => *existing = preset.clone(),
            None => self.presets.push(preset.clone()),
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> SolcalResult<()> {
        self.presets.retain(|p| p.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn manager() -> PresetManager<MemoryPresetStore> {
        PresetManager::load(MemoryPresetStore::default()).unwrap()
    }

    #[test]
    fn empty_store_gets_default_preset() {
        let m = manager();
        assert_eq!(m.presets().len(), 1);
        assert_eq!(m.active().name, DEFAULT_PRESET_NAME);
        assert_eq!(m.active().start_date, date(2020, 1, 1));
    }

    #[test]
    fn create_and_select() {
        let mut m = manager();
        let id = m.create("equinox", date(2021, 3, 20)).unwrap().id.clone();
        assert_eq!(m.presets().len(), 2);

        m.select(&id).unwrap();
        assert_eq!(m.active().name, "equinox");
    }

    #[test]
    fn create_duplicate_name_fails() {
        let mut m = manager();
        m.create("equinox", date(2021, 3, 20)).unwrap();
        assert!(matches!(
            m.create("equinox", date(2022, 3, 20)).unwrap_err(),
            SolcalError::Validation(_)
        ));
    }

    #[test]
    fn create_empty_name_fails() {
        let mut m = manager();
        assert!(matches!(
            m.create("  ", date(2021, 1, 1)).unwrap_err(),
            SolcalError::Validation(_)
        ));
    }

    #[test]
    fn select_unknown_id_fails() {
        let mut m = manager();
        assert_eq!(
            m.select("no-such-id").unwrap_err(),
            SolcalError::NotFound("no-such-id".into())
        );
    }

    #[test]
    fn update_renames_and_redates() {
        let mut m = manager();
        let id = m.create("old", date(2021, 1, 1)).unwrap().id.clone();
        m.update(
            &id,
            PresetPatch {
                name: Some("new".into()),
                start_date: Some(date(2022, 2, 2)),
            },
        )
        .unwrap();

        let preset = m.find_by_name("new").unwrap();
        assert_eq!(preset.start_date, date(2022, 2, 2));
        assert!(m.find_by_name("old").is_none());
    }

    #[test]
    fn update_to_taken_name_fails() {
        let mut m = manager();
        let id = m.create("a", date(2021, 1, 1)).unwrap().id.clone();
        m.create("b", date(2021, 2, 1)).unwrap();
        assert!(matches!(
            m.update(
                &id,
                PresetPatch {
                    name: Some("b".into()),
                    ..PresetPatch::default()
                }
            )
            .unwrap_err(),
            SolcalError::Validation(_)
        ));
    }

    #[test]
    fn update_keeping_own_name_is_allowed() {
        let mut m = manager();
        let id = m.create("same", date(2021, 1, 1)).unwrap().id.clone();
        m.update(
            &id,
            PresetPatch {
                name: Some("same".into()),
                start_date: Some(date(2023, 1, 1)),
            },
        )
        .unwrap();
        assert_eq!(m.find_by_name("same").unwrap().start_date, date(2023, 1, 1));
    }

    #[test]
    fn delete_inactive_preset() {
        let mut m = manager();
        let id = m.create("extra", date(2021, 1, 1)).unwrap().id.clone();
        m.delete(&id).unwrap();
        assert_eq!(m.presets().len(), 1);
        assert_eq!(m.active().name, DEFAULT_PRESET_NAME);
    }

    #[test]
    fn delete_active_falls_back_to_default() {
        let mut m = manager();
        let id = m.create("temp", date(2021, 1, 1)).unwrap().id.clone();
        m.select(&id).unwrap();
        m.delete(&id).unwrap();
        assert_eq!(m.active().name, DEFAULT_PRESET_NAME);
    }

    #[test]
    fn delete_active_recreates_default_if_missing() {
        let mut m = manager();
        let temp_id = m.create("temp", date(2021, 1, 1)).unwrap().id.clone();
        let default_id = m.find_by_name(DEFAULT_PRESET_NAME).unwrap().id.clone();

        m.select(&temp_id).unwrap();
        m.delete(&default_id).unwrap();
        assert_eq!(m.presets().len(), 1);

        // Deleting the active (and only) preset must leave a usable anchor.
        m.delete(&temp_id).unwrap();
        assert_eq!(m.active().name, DEFAULT_PRESET_NAME);
        assert_eq!(m.presets().len(), 1);
    }

    #[test]
    fn delete_unknown_id_fails() {
        let mut m = manager();
        assert!(matches!(
            m.delete("missing").unwrap_err(),
            SolcalError::NotFound(_)
        ));
    }

    #[test]
    fn listeners_fire_on_select_and_delete_fallback() {
        let mut m = manager();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        m.on_anchor_change(move |_| counter.set(counter.get() + 1));

        let id = m.create("temp", date(2021, 1, 1)).unwrap().id.clone();
        assert_eq!(fired.get(), 0); // create alone does not change the anchor

        m.select(&id).unwrap();
        assert_eq!(fired.get(), 1);

        m.delete(&id).unwrap(); // fallback re-selects default
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn listener_fires_on_active_edit_only() {
        let mut m = manager();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        m.on_anchor_change(move |_| counter.set(counter.get() + 1));

        let inactive_id = m.create("other", date(2021, 1, 1)).unwrap().id.clone();
        m.update(
            &inactive_id,
            PresetPatch {
                start_date: Some(date(2022, 1, 1)),
                ..PresetPatch::default()
            },
        )
        .unwrap();
        assert_eq!(fired.get(), 0);

        let active_id = m.active().id.clone();
        m.update(
            &active_id,
            PresetPatch {
                start_date: Some(date(2019, 1, 1)),
                ..PresetPatch::default()
            },
        )
        .unwrap();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn store_is_kept_in_sync() {
        let mut m = manager();
        let id = m.create("kept", date(2021, 1, 1)).unwrap().id.clone();
        m.delete(&id).unwrap();

        let stored = m.store.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name, DEFAULT_PRESET_NAME);
    }
}
