/// 場景管理模塊
///
/// The host side of the bootstrap: objects, parenting, active flags,
/// activation callbacks, template instantiation and the long-lived partition.

pub mod activation;
pub mod core;
pub mod instantiate;

pub use self::core::Scene;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comp::*;
    use crate::error::BootError;
    use crate::template::{BehaviourSpawner, Template, TemplateNode};
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Journal = Arc<Mutex<Vec<String>>>;

    #[derive(Clone)]
    struct Recorder {
        tag: &'static str,
        journal: Journal,
    }

    impl Recorder {
        fn new(tag: &'static str, journal: &Journal) -> Self {
            Self { tag, journal: journal.clone() }
        }

        fn note(&self, event: &str) {
            self.journal.lock().push(format!("{}:{}", self.tag, event));
        }
    }

    impl Behaviour for Recorder {
        fn on_awake(&mut self, _ctx: &mut ActivationContext<'_>) {
            self.note("awake");
        }

        fn on_enable(&mut self, _ctx: &mut ActivationContext<'_>) {
            self.note("enable");
        }

        fn on_disable(&mut self, _ctx: &mut ActivationContext<'_>) {
            self.note("disable");
        }

        fn on_destroy(&mut self, _ctx: &mut ActivationContext<'_>) {
            self.note("destroy");
        }
    }

    fn take(journal: &Journal) -> Vec<String> {
        std::mem::take(&mut *journal.lock())
    }

    #[test]
    fn test_callbacks_follow_active_in_hierarchy() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let parent = scene.spawn("parent", None, false).unwrap();
        let child = scene.spawn("child", Some(parent), true).unwrap();
        scene.add_behaviour(child, Box::new(Recorder::new("c", &journal))).unwrap();

        assert!(scene.is_active_self(child));
        assert!(!scene.is_active_in_hierarchy(child));
        assert!(take(&journal).is_empty());

        scene.set_active(parent, true).unwrap();
        assert_eq!(take(&journal), vec!["c:awake", "c:enable"]);

        scene.set_active(parent, false).unwrap();
        scene.set_active(parent, true).unwrap();
        // Awake only once.
        assert_eq!(take(&journal), vec!["c:disable", "c:enable"]);
    }

    #[test]
    fn test_behaviour_added_to_enabled_object_starts_at_once() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let e = scene.spawn("live", None, true).unwrap();
        assert!(scene.is_awake(e));

        scene.add_behaviour(e, Box::new(Recorder::new("a", &journal))).unwrap();
        scene.add_behaviour(e, Box::new(Recorder::new("b", &journal))).unwrap();
        assert_eq!(take(&journal), vec!["a:awake", "a:enable", "b:awake", "b:enable"]);
    }

    #[test]
    fn test_destroy_tears_down_children_first() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let root = scene.spawn("root", None, true).unwrap();
        let leaf = scene.spawn("leaf", Some(root), true).unwrap();
        scene.add_behaviour(root, Box::new(Recorder::new("root", &journal))).unwrap();
        scene.add_behaviour(leaf, Box::new(Recorder::new("leaf", &journal))).unwrap();
        take(&journal);

        scene.destroy(root).unwrap();
        assert_eq!(
            take(&journal),
            vec!["leaf:disable", "leaf:destroy", "root:disable", "root:destroy"]
        );
        assert!(!scene.is_alive(root));
        assert!(!scene.is_alive(leaf));
        assert!(matches!(scene.destroy(root), Err(BootError::DeadEntity(_))));
    }

    #[test]
    fn test_never_awoken_objects_get_no_destroy_callback() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let hidden = scene.spawn("hidden", None, false).unwrap();
        scene.add_behaviour(hidden, Box::new(Recorder::new("h", &journal))).unwrap();
        scene.destroy(hidden).unwrap();
        assert!(take(&journal).is_empty());
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut scene = Scene::new();
        let a = scene.spawn("a", None, true).unwrap();
        let b = scene.spawn("b", Some(a), true).unwrap();
        let c = scene.spawn("c", Some(b), true).unwrap();

        assert!(matches!(
            scene.set_parent(a, Some(c)),
            Err(BootError::HierarchyCycle { .. })
        ));
        assert!(matches!(
            scene.set_parent(a, Some(a)),
            Err(BootError::HierarchyCycle { .. })
        ));

        scene.set_parent(c, None).unwrap();
        assert_eq!(scene.parent(c), None);
        assert!(scene.children(b).is_empty());
        assert_eq!(scene.roots(), vec![a, c]);
    }

    #[test]
    fn test_persistence_is_per_partition() {
        let mut scene = Scene::new();
        let keep = scene.spawn("keep", None, true).unwrap();
        let inner = scene.spawn("inner", Some(keep), true).unwrap();
        let drop_me = scene.spawn("drop", None, true).unwrap();

        assert!(matches!(scene.mark_persistent(inner), Err(BootError::NotRoot(_))));
        scene.mark_persistent(keep).unwrap();
        assert!(scene.is_persistent(inner));

        // Detaching keeps the partition.
        scene.set_parent(inner, None).unwrap();
        assert!(scene.is_persistent(inner));

        // Attaching adopts the new parent's partition.
        let moved = scene.spawn("moved", Some(drop_me), true).unwrap();
        scene.set_parent(moved, Some(keep)).unwrap();
        assert!(scene.is_persistent(moved));

        assert_eq!(scene.load_scene("Level1"), 1);
        assert_eq!(scene.loaded_scene(), "Level1");
        assert!(!scene.is_alive(drop_me));
        assert!(scene.is_alive(keep) && scene.is_alive(inner) && scene.is_alive(moved));
        assert_eq!(scene.persistent_roots(), vec![keep, inner]);
    }

    #[test]
    fn test_instantiate_copies_structure_and_flags() {
        let journal = Journal::default();
        let recorder = Recorder::new("p", &journal);
        let template = Template::new("Prefab")
            .with_child(
                TemplateNode::new("A")
                    .with_behaviour(BehaviourSpawner::of(recorder.clone()))
                    .with_child(TemplateNode::new("A1").inactive()),
            )
            .with_child(TemplateNode::new("B"));

        let mut scene = Scene::new();
        let root = scene.instantiate(&template, None).unwrap();
        assert_eq!(scene.name(root).as_deref(), Some("Prefab"));

        let kids = scene.children(root);
        assert_eq!(kids.len(), 2);
        assert_eq!(scene.name(kids[0]).as_deref(), Some("A"));
        let a1 = scene.find("A1").unwrap();
        assert_eq!(scene.parent(a1), Some(kids[0]));
        assert!(!scene.is_active_self(a1));
        assert!(!scene.is_awake(a1));
        assert_eq!(take(&journal), vec!["p:awake", "p:enable"]);

        // Instantiating twice yields an independent copy.
        let second = scene.instantiate(&template, None).unwrap();
        assert_ne!(root, second);
        assert_eq!(scene.object_count(), 8);
    }

    #[test]
    fn test_failed_instantiate_leaves_scene_untouched() {
        let template = Template::new("Broken")
            .with_child(TemplateNode::new("ok").with_child(TemplateNode::new("deeper")))
            .with_child(
                TemplateNode::new("bad").with_behaviour(BehaviourSpawner::new("Exploding", || {
                    Err(failure::err_msg("boom"))
                })),
            );

        let mut scene = Scene::new();
        let holder = scene.spawn("holder", None, false).unwrap();
        let err = scene.instantiate(&template, Some(holder)).unwrap_err();
        match err {
            BootError::Instantiate { template, reason } => {
                assert_eq!(template, "Broken");
                assert_eq!(reason, "boom");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(scene.object_count(), 1);
        assert!(scene.children(holder).is_empty());
    }

    #[test]
    fn test_registry_handle_is_shared_with_the_scene() {
        let registry = crate::persist::SingletonRegistry::new();
        let scene = Scene::with_registry(registry.clone());
        assert!(scene.registry().ptr_eq(&registry));
        assert!(!Scene::new().registry().ptr_eq(&registry));
    }

    #[test]
    fn test_load_scene_destroys_transient_roots_only() {
        let journal = Journal::default();
        let mut scene = Scene::new();
        let kept = scene.spawn("kept", None, true).unwrap();
        scene.mark_persistent(kept).unwrap();
        let level = scene.spawn("level", None, true).unwrap();
        scene.add_behaviour(level, Box::new(Recorder::new("level", &journal))).unwrap();
        take(&journal);

        assert_eq!(scene.load_scene("Next"), 1);
        assert_eq!(take(&journal), vec!["level:disable", "level:destroy"]);
        assert!(scene.is_alive(kept));
        assert!(!scene.is_alive(level));
        assert_eq!(scene.loaded_scene(), "Next");
    }
}
