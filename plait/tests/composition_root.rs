//! Composition-root cycle behavior: one-time initialization, staleness and
//! refresh, host-props priority, change filters, atomic publication.

use plait::testing::{CallLog, InitCounter, RecordingPlugin};
use plait::{
    ComposeError, HookOutcome, HookTable, Plugin, PluginHost, PluginManifest, names,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

mod common;
use common::{Doc, Key, doc, key};

type Recorder = RecordingPlugin<Key, Doc>;
type Manifest = PluginManifest<Key, Doc>;

#[test]
fn initialize_runs_once_per_plugin_identity() {
    let count = Arc::new(AtomicUsize::new(0));
    let mut host = PluginHost::builder(doc("base"))
        .plugin(InitCounter::<Key, Doc>::new(Arc::clone(&count)))
        .build()
        .unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);

    host.set_state(doc("changed"));
    assert!(host.refresh().unwrap());
    host.set_state(doc("changed again"));
    assert!(host.refresh().unwrap());

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn fresh_plugins_initialize_even_when_allocations_are_reused() {
    // Churn the plugin set so dropped plugins free their allocations;
    // a replacement landing at a recycled address must still get its
    // one-time initialize.
    let count = Arc::new(AtomicUsize::new(0));
    let mut host: PluginHost<Key, Doc> = PluginHost::builder(doc("base")).build().unwrap();

    for round in 1..=64 {
        let fresh: Arc<dyn Plugin<Key, Doc>> =
            Arc::new(InitCounter::<Key, Doc>::new(Arc::clone(&count)));
        host.set_plugins(vec![fresh]);
        host.refresh().unwrap();
        assert_eq!(count.load(Ordering::SeqCst), round);

        host.set_plugins(Vec::new());
        host.refresh().unwrap();
    }
}

#[test]
fn surviving_plugin_is_not_reinitialized_across_replacement() {
    let count = Arc::new(AtomicUsize::new(0));
    let keeper: Arc<dyn Plugin<Key, Doc>> =
        Arc::new(InitCounter::<Key, Doc>::new(Arc::clone(&count)));
    let mut host = PluginHost::builder(doc("base"))
        .plugin_arc(Arc::clone(&keeper))
        .build()
        .unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);

    host.set_plugins(vec![Arc::clone(&keeper)]);
    host.refresh().unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn failing_initialize_aborts_the_cycle() {
    let count = Arc::new(AtomicUsize::new(0));
    let result = PluginHost::builder(doc("base"))
        .plugin(InitCounter::<Key, Doc>::new(Arc::clone(&count)).failing("no backend"))
        .build();

    let err = result.err().expect("initialize failure must abort the build");
    match err {
        ComposeError::Initialize { plugin, .. } => assert_eq!(plugin, "init-counter"),
    }
}

#[test]
fn refresh_without_changes_is_a_no_op() {
    let mut host: PluginHost<Key, Doc> = PluginHost::builder(doc("base")).build().unwrap();
    assert!(!host.is_stale());
    assert!(!host.refresh().unwrap());
}

#[test]
fn set_state_marks_the_composition_stale() {
    let mut host: PluginHost<Key, Doc> = PluginHost::builder(doc("base")).build().unwrap();
    host.set_state(doc("changed"));
    assert!(host.is_stale());
    assert!(host.refresh().unwrap());
    assert!(!host.is_stale());
}

#[test]
fn change_filters_run_in_plugin_order() {
    let host = PluginHost::builder(doc("base"))
        .plugin(Manifest::new().on_change(|state: Doc, _| doc(&format!("{}|p1", state.text))))
        .plugin(Manifest::new().on_change(|state: Doc, _| doc(&format!("{}|p2", state.text))))
        .build()
        .unwrap();

    host.set_state(doc("next"));
    assert_eq!(host.state(), doc("next|p1|p2"));
}

#[test]
fn set_state_while_read_only_is_dropped() {
    let host: PluginHost<Key, Doc> = PluginHost::builder(doc("base")).build().unwrap();
    host.context().set_read_only(true);
    host.set_state(doc("ignored"));
    assert_eq!(host.state(), doc("base"));
}

#[test]
fn host_props_compose_ahead_of_every_plugin() {
    let log = CallLog::new();
    let props_log = log.clone();
    let host = PluginHost::builder(doc("base"))
        .props(Manifest::new().on(names::ON_TAB, move |_: &Key, _| {
            props_log.push("host:onTab");
            false
        }))
        .plugin(Recorder::new("p1", log.clone()).handles(names::ON_TAB))
        .build()
        .unwrap();

    host.composition()
        .handle_event(names::ON_TAB, &key("Tab"), host.context())
        .unwrap();

    assert_eq!(log.entries(), vec!["host:onTab", "p1:onTab"]);
}

#[test]
fn added_plugin_is_composed_on_the_next_refresh() {
    let log = CallLog::new();
    let mut host = PluginHost::builder(doc("base"))
        .plugin(Recorder::new("p1", log.clone()).handles(names::ON_TAB))
        .build()
        .unwrap();

    host.push_plugin(Recorder::new("p2", log.clone()).handles(names::ON_TAB));
    assert!(host.is_stale());
    assert!(host.refresh().unwrap());

    host.composition()
        .handle_event(names::ON_TAB, &key("Tab"), host.context())
        .unwrap();
    assert_eq!(log.entries(), vec!["p1:onTab", "p2:onTab"]);
}

#[test]
fn recomposition_with_unchanged_inputs_is_equivalent() {
    let mut host = PluginHost::builder(doc("base"))
        .plugin(Manifest::new().produce(names::BLOCK_STYLE_FN, |_: &Key, _| "code"))
        .plugin(
            Manifest::new()
                .on(names::ON_TAB, |_: &Key, _| true)
                .produce(names::BLOCK_STYLE_FN, |_: &Key, _| "fixed"),
        )
        .build()
        .unwrap();

    let before = host.composition();

    host.set_state(doc("nudge"));
    assert!(host.refresh().unwrap());
    let after = host.composition();

    let mut names_before: Vec<_> = before.hook_names().map(str::to_string).collect();
    let mut names_after: Vec<_> = after.hook_names().map(str::to_string).collect();
    names_before.sort_unstable();
    names_after.sort_unstable();
    assert_eq!(names_before, names_after);

    // Behavioral equivalence, not function identity.
    assert_eq!(
        before
            .run_fn(names::BLOCK_STYLE_FN, &key("block"), host.context())
            .unwrap(),
        after
            .run_fn(names::BLOCK_STYLE_FN, &key("block"), host.context())
            .unwrap(),
    );
    assert_eq!(
        before
            .handle_event(names::ON_TAB, &key("Tab"), host.context())
            .unwrap(),
        after
            .handle_event(names::ON_TAB, &key("Tab"), host.context())
            .unwrap(),
    );
    assert_eq!(before.decorators(), after.decorators());
    assert_eq!(before.style_map(), after.style_map());
}

#[test]
fn publication_is_atomic_from_the_context() {
    let log = CallLog::new();
    let mut host = PluginHost::builder(doc("base"))
        .plugin(Recorder::new("p1", log.clone()).handles(names::ON_TAB))
        .build()
        .unwrap();

    let ctx = host.context().clone();
    let old_table = ctx.hooks().unwrap();

    host.push_plugin(
        Recorder::new("p2", log.clone())
            .handles(names::ON_TAB)
            .with_outcome(HookOutcome::Handled),
    );
    host.refresh().unwrap();
    let new_table = ctx.hooks().unwrap();

    // The old table is still a coherent whole cycle.
    assert_eq!(
        old_table.handle_event(names::ON_TAB, &key("Tab"), &ctx).unwrap(),
        HookOutcome::NotHandled
    );
    // The swapped-in table reflects the full new cycle.
    assert_eq!(
        new_table.handle_event(names::ON_TAB, &key("Tab"), &ctx).unwrap(),
        HookOutcome::Handled
    );
}

#[test]
fn plugins_can_call_back_into_composed_hooks() {
    let host = PluginHost::builder(doc("base"))
        .plugin(Manifest::new().produce(names::BLOCK_STYLE_FN, |_: &Key, _| "inner"))
        .plugin(Manifest::new().on(names::ON_TAB, |event: &Key, ctx| {
            let table = ctx.hooks().expect("composition published");
            let style = table.run_fn(names::BLOCK_STYLE_FN, event, ctx).unwrap();
            style == Some("inner".into())
        }))
        .build()
        .unwrap();

    let outcome = host
        .composition()
        .handle_event(names::ON_TAB, &key("Tab"), host.context())
        .unwrap();
    assert_eq!(outcome, HookOutcome::Handled);
}
