//! Decides which filesystem notifications should arm the debounce timer.

use crate::manifest::ManifestGenerator;
use notify::{Event, EventKind};

/// Filters raw `notify` events down to changes that can alter the manifest.
#[derive(Debug, Clone)]
pub struct EventFilter {
    /// Generator whose listing rules are applied to event paths.
    generator: ManifestGenerator,
}

impl EventFilter {
    /// Builds a filter using the generator's manifest name and allow-list.
    #[must_use]
    pub fn for_generator(generator: &ManifestGenerator) -> Self {
        Self {
            generator: generator.clone(),
        }
    }

    /// Returns the first filename in `event` that would appear in the manifest.
    ///
    /// Access-only events, events without a filename and events for the
    /// manifest itself yield `None`.
    #[must_use]
    pub fn qualifying_name(&self, event: &Event) -> Option<String> {
        if matches!(event.kind, EventKind::Access(_)) {
            return None;
        }

        event
            .paths
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .find(|name| self.generator.is_listed(name))
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind, RenameMode};
    use std::path::PathBuf;

    fn filter() -> EventFilter {
        EventFilter::for_generator(&ManifestGenerator::new("media"))
    }

    fn event(kind: EventKind, names: &[&str]) -> Event {
        names.iter().fold(Event::new(kind), |event, name| {
            event.add_path(PathBuf::from("media").join(name))
        })
    }

    #[test]
    fn test_new_image_qualifies() {
        let e = event(EventKind::Create(CreateKind::File), &["cat.PNG"]);
        assert_eq!(filter().qualifying_name(&e), Some("cat.PNG".to_string()));
    }

    #[test]
    fn test_removed_image_qualifies() {
        let e = event(EventKind::Remove(RemoveKind::File), &["old.gif"]);
        assert_eq!(filter().qualifying_name(&e), Some("old.gif".to_string()));
    }

    #[test]
    fn test_irrelevant_extension_is_ignored() {
        let e = event(EventKind::Create(CreateKind::File), &["notes.txt"]);
        assert_eq!(filter().qualifying_name(&e), None);
    }

    #[test]
    fn test_manifest_is_ignored() {
        let e = event(EventKind::Modify(ModifyKind::Any), &["manifest.json"]);
        assert_eq!(filter().qualifying_name(&e), None);
    }

    #[test]
    fn test_manifest_with_image_extension_is_ignored() {
        let generator = ManifestGenerator::new("media").manifest_file("index.svg");
        let e = event(EventKind::Modify(ModifyKind::Any), &["index.svg"]);
        assert_eq!(EventFilter::for_generator(&generator).qualifying_name(&e), None);
    }

    #[test]
    fn test_event_without_paths_is_ignored() {
        let e = Event::new(EventKind::Any);
        assert_eq!(filter().qualifying_name(&e), None);
    }

    #[test]
    fn test_access_events_are_ignored() {
        let e = event(EventKind::Access(AccessKind::Any), &["cat.png"]);
        assert_eq!(filter().qualifying_name(&e), None);
    }

    #[test]
    fn test_rename_into_image_name_qualifies() {
        let e = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &[".upload.tmp", "cat.webp"],
        );
        assert_eq!(filter().qualifying_name(&e), Some("cat.webp".to_string()));
    }

    #[test]
    fn test_temp_file_from_atomic_write_is_ignored() {
        let e = event(EventKind::Create(CreateKind::File), &[".manifest-a1b2c3.tmp"]);
        assert_eq!(filter().qualifying_name(&e), None);
    }
}
