use std::fs;
use std::path::{Path, PathBuf};

use tool_content::ContentFactory;
use tool_core::{Identifier, ModifierEntry};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn id(path: &'static str) -> Identifier {
    Identifier::from_static("tool", path)
}

#[test]
fn shipped_data_loads() {
    let content = ContentFactory::new(data_dir()).build().unwrap();

    assert_eq!(content.env().config().max_level, 5);
    assert_eq!(content.env().materials().len(), 4);
    assert!(content.env().modifiers().contains(&id("torch")));
    assert_eq!(content.tools().count(), 3);

    let hammer = content.tool(&id("hammer")).unwrap();
    assert_eq!(hammer.traits, vec![ModifierEntry::new(id("reinforced"), 1)]);
}

#[test]
fn shipped_pickaxe_rebuilds() {
    let content = ContentFactory::new(data_dir()).build().unwrap();
    let stats = content.env().tool_stats().clone();

    let mut stack = content
        .stack(&id("pickaxe"), vec![id("iron"), id("wood"), id("iron")])
        .unwrap()
        .unwrap();

    // (250 head + 60 extra) × 1.0 handle
    assert_eq!(stack.stat(&stats.durability), 310.0);
    assert_eq!(stack.stat(&stats.mining_speed), 6.0);
    assert_eq!(stack.harvest_tier(), 2);

    stack
        .set_modifiers(vec![
            ModifierEntry::new(id("diamond"), 1),
            ModifierEntry::new(id("brittle"), 1),
        ])
        .unwrap();
    assert_eq!(stack.stat(&stats.durability), 810.0);
    assert_eq!(stack.stat(&stats.harvest_tier), 3);
    assert_eq!(stack.harvest_tier(), 1);

    stack
        .set_modifiers(vec![
            ModifierEntry::new(id("solar"), 2),
            ModifierEntry::new(id("photosynthetic"), 2),
            ModifierEntry::new(id("torch"), 1),
        ])
        .unwrap();
    let durability = stack.stat(&stats.durability);
    assert!((durability - 372.0).abs() < 1e-3, "durability was {durability}");
    assert!(stack.can_perform(&id("place_torch")));
}

#[test]
fn trait_modifiers_apply_to_every_instance() {
    let content = ContentFactory::new(data_dir()).build().unwrap();
    let kama = content
        .stack(&id("kama"), vec![id("flint"), id("bone")])
        .unwrap()
        .unwrap();

    assert!(kama.can_perform(&id("till")));
    assert!(kama.modifiers().is_empty());
    assert_eq!(kama.level(&id("tilling")), 1);
}

#[test]
fn unknown_tool_is_none() {
    let content = ContentFactory::new(data_dir()).build().unwrap();
    assert!(content.stack(&id("spoon"), Vec::new()).is_none());
}

fn write_minimal(dir: &Path, modifiers: &str, tools: &str) {
    fs::write(dir.join("materials.ron"), "(materials: [])").unwrap();
    fs::write(dir.join("modifiers.ron"), modifiers).unwrap();
    fs::write(dir.join("tools.ron"), tools).unwrap();
}

#[test]
fn missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFactory::new(dir.path()).build().unwrap_err();
    assert!(err.to_string().contains("materials.ron"), "{err}");
}

#[test]
fn invalid_hook_override_fails_registration() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal(
        dir.path(),
        r#"(modifiers: [(
            id: "tool:leaky",
            modules: [(module: Tank(capacity: (flat: 10.0)), hooks: Some(["tool:melee_damage"]))],
        )])"#,
        "(tools: [])",
    );

    let err = ContentFactory::new(dir.path()).build().unwrap_err();
    assert!(err.to_string().contains("tool:leaky"), "{err}");
}

#[test]
fn unknown_trait_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal(
        dir.path(),
        "(modifiers: [])",
        r#"(tools: [(id: "tool:axe", parts: [head], traits: ["tool:ghost@2"])])"#,
    );

    let err = ContentFactory::new(dir.path()).build().unwrap_err();
    assert!(err.to_string().contains("tool:ghost"), "{err}");
}

#[test]
fn duplicate_tool_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal(
        dir.path(),
        "(modifiers: [])",
        r#"(tools: [(id: "tool:axe", parts: [head]), (id: "tool:axe", parts: [head])])"#,
    );

    assert!(ContentFactory::new(dir.path()).build().is_err());
}

#[test]
fn config_file_overrides_limits() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal(dir.path(), "(modifiers: [])", "(tools: [])");
    fs::write(dir.path().join("config.toml"), "max_modifiers = 2\n").unwrap();

    let content = ContentFactory::new(dir.path()).build().unwrap();
    assert_eq!(content.env().config().max_modifiers, 2);
    assert_eq!(content.env().config().max_level, 10);
}
