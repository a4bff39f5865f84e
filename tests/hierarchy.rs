//! Class hierarchy analysis integration tests.
//!
//! These tests exercise the public API end to end:
//! 1. Build a program model from classes and methods
//! 2. Index it with `HierarchyIndex`
//! 3. Resolve signatures and compute dispatch sets per call site
//! 4. Search implementors across the whole program

use std::sync::Arc;

use chascope::prelude::*;

/// `Animal` declares `speak`, `Dog` overrides it, `Cat` inherits it.
fn animals() -> (Program, Type, Type, Type) {
    let animal = Type::new("Lcom/example/Animal;");
    let dog = Type::new("Lcom/example/Dog;");
    let cat = Type::new("Lcom/example/Cat;");
    let void = Type::new("V");

    let program = Program::new(vec![
        Class::new(animal.clone(), None)
            .with_method(Method::new(animal.clone(), "speak", void.clone(), vec![])),
        Class::new(dog.clone(), Some(animal.clone()))
            .with_method(Method::new(dog.clone(), "speak", void, vec![])),
        Class::new(cat.clone(), Some(animal.clone())),
    ]);

    (program, animal, dog, cat)
}

fn speak() -> MethodRef {
    MethodRef::new("speak", Type::new("V"), vec![])
}

fn declared(index: &HierarchyIndex, ty: &Type) -> MethodRc {
    index
        .definition(ty)
        .and_then(|class| class.find_virtual(&speak()))
        .cloned()
        .expect("class declares speak")
}

fn caller(class: &Type) -> Instruction {
    let method = Method::new(class.clone(), "run", Type::new("V"), vec![]);
    Instruction::new(Arc::new(method), 4)
}

#[test]
fn animal_scenario() -> Result<()> {
    let (program, animal, dog, cat) = animals();
    program.validate()?;
    let index = HierarchyIndex::new(&program);

    assert_eq!(
        index.resolve_method_ref(&cat, &speak()),
        Some(declared(&index, &animal))
    );
    assert_eq!(
        index.resolve_method_ref(&dog, &speak()),
        Some(declared(&index, &dog))
    );

    let receiver = Value::Parameter {
        index: 1,
        ty: animal.clone(),
    };
    let targets =
        index.virtual_dispatch(&caller(&cat), InvokeKind::Virtual, &speak(), &receiver);
    let expected: DispatchTargets = [declared(&index, &animal), declared(&index, &dog)]
        .into_iter()
        .collect();
    assert_eq!(targets, expected);

    Ok(())
}

#[test]
fn exact_receiver_devirtualizes() {
    let (program, _, dog, _) = animals();
    let index = HierarchyIndex::new(&program);

    let receiver =
        Value::NewInstance { ty: dog.clone() }.cast(Type::new("Lcom/example/Animal;"));
    let targets =
        index.virtual_dispatch(&caller(&dog), InvokeKind::Virtual, &speak(), &receiver);

    assert_eq!(targets.single(), Some(&declared(&index, &dog)));
}

#[test]
fn super_call_targets_declaring_superclass() {
    let (program, animal, dog, _) = animals();
    let index = HierarchyIndex::new(&program);

    // `super.speak()` inside Dog, whatever the receiver
    for receiver in [
        Value::Parameter {
            index: 0,
            ty: dog.clone(),
        },
        Value::NewInstance { ty: dog.clone() },
        Value::MoveException { ty: animal.clone() },
    ] {
        let targets =
            index.virtual_dispatch(&caller(&dog), InvokeKind::Super, &speak(), &receiver);
        assert!(targets.len() <= 1);
        assert_eq!(targets.single(), Some(&declared(&index, &animal)));
    }
}

#[test]
fn partial_program_library() {
    // A library whose host application (and platform) classes are absent
    let activity = Type::new("Landroid/app/Activity;");
    let base = Type::new("Lcom/lib/BaseScreen;");
    let screen = Type::new("Lcom/lib/Screen;");
    let void = Type::new("V");
    let bundle = Type::new("Landroid/os/Bundle;");
    let on_create = MethodRef::new("onCreate", void.clone(), vec![bundle.clone()]);

    let program = Program::new(vec![
        Class::new(base.clone(), Some(activity.clone())).with_method(Method::new(
            base.clone(),
            "onCreate",
            void,
            vec![bundle],
        )),
        Class::new(screen.clone(), Some(base.clone())),
    ]);
    let index = HierarchyIndex::new(&program);

    assert!(index.definition(&activity).is_none());
    assert!(index.superclass_def(&base).is_none());
    assert_eq!(index.superclass(&base), Some(&activity));
    assert_eq!(
        index
            .resolve_method_ref(&screen, &on_create)
            .map(|m| m.class.clone()),
        Some(base.clone())
    );

    // Unknown receiver typed as the missing platform class still reaches library overrides
    let targets = index.any_target(InvokeKind::Virtual, &on_create, &activity);
    assert_eq!(targets.len(), 1);

    // Nothing above the library defines it
    assert!(index.resolve_super(&base, &on_create).is_none());
}

#[test]
fn implementor_search_stays_within_hierarchy() {
    let runnable = Type::new("Ljava/lang/Runnable;");
    let void = Type::new("V");
    let run = MethodRef::new("run", void.clone(), vec![]);

    let program = Program::new(vec![
        Class::new(Type::new("LTask;"), None)
            .implements(runnable.clone())
            .with_method(Method::new(Type::new("LTask;"), "run", void.clone(), vec![])),
        Class::new(Type::new("LRetryTask;"), Some(Type::new("LTask;")))
            .with_method(Method::new(Type::new("LRetryTask;"), "run", void.clone(), vec![])),
        // Same signature, unrelated to Runnable
        Class::new(Type::new("LEngine;"), None)
            .with_method(Method::new(Type::new("LEngine;"), "run", void, vec![])),
    ]);
    let index = HierarchyIndex::new(&program);

    let found: Vec<_> = index
        .implementations_of(runnable.name(), &run)
        .iter()
        .map(|m| m.class.name().to_string())
        .collect();
    assert_eq!(found, vec!["LTask;", "LRetryTask;"]);
}

#[test]
fn batch_resolution_statistics() {
    let (program, animal, dog, cat) = animals();
    let index = HierarchyIndex::new(&program);

    let sites: Vec<CallSite> = [
        Value::NewInstance { ty: cat.clone() },
        Value::Parameter {
            index: 1,
            ty: animal.clone(),
        },
        Value::Other {
            ty: Type::new("Lcom/example/Rock;"),
        },
    ]
    .into_iter()
    .map(|receiver| CallSite::new(caller(&dog), InvokeKind::Virtual, speak(), receiver))
    .collect();

    let targets = index.resolve_call_sites(&sites);
    let stats = SiteStats::from_targets(&targets);

    assert_eq!(stats.total_call_sites, 3);
    assert_eq!(stats.monomorphic_calls, 1);
    assert_eq!(stats.polymorphic_calls, 1);
    assert!((stats.resolution_rate() - 200.0 / 3.0).abs() < 1e-9);

    let index_stats = index.stats();
    assert_eq!(index_stats.classes, 3);
    assert!(index_stats.cache_entries > 0);
}
