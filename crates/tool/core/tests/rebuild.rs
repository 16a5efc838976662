use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use tool_core::hooks::InteractionResult;
use tool_core::modifier::modules::{
    InteractionModule, ReinforcedModule, SetStatModule, SharpnessModule, StatBoost,
    StatBoostModule, TankModule, TierBoostModule, TierCapModule, ToolActionModule,
    VolatileFlagModule,
};
use tool_core::stats::{HandleStats, HeadStats};
use tool_core::{
    HookError, Identifier, LevelingValue, MaterialStats, Modifier, ModifierEntry, ModifierError,
    ModifierHookMap, ModifierHooks, PartSlot, RandomLevelingValue, RebuildError, StatsSnapshot,
    ToolBuild, ToolConfig, ToolDefinition, ToolEnv, ToolInput, ToolStack,
};
use tool_core::{EnvError, PartStatsBySlot};

fn id(path: &'static str) -> Identifier {
    Identifier::from_static("test", path)
}

fn entry(path: &'static str, level: u32) -> ModifierEntry {
    ModifierEntry::new(id(path), level)
}

struct Fixture {
    env: Arc<ToolEnv>,
    pickaxe: Arc<ToolDefinition>,
}

impl Fixture {
    fn stack(&self, modifiers: Vec<ModifierEntry>) -> Result<ToolStack, RebuildError> {
        let mut stack = ToolStack::new(
            Arc::clone(&self.env),
            Arc::clone(&self.pickaxe),
            vec![id("iron"), id("flint"), id("wood")],
        )?;
        stack.set_modifiers(modifiers)?;
        Ok(stack)
    }
}

fn base_env(config: ToolConfig) -> ToolEnv {
    let mut env = ToolEnv::new(config).unwrap();

    env.register_material(
        id("iron"),
        MaterialStats::default().with_head(HeadStats {
            durability: 100.0,
            mining_speed: 6.0,
            attack_damage: 2.0,
            harvest_tier: 3,
        }),
    )
    .unwrap();
    env.register_material(
        id("flint"),
        MaterialStats::default().with_head(HeadStats {
            durability: 50.0,
            mining_speed: 4.0,
            attack_damage: 1.0,
            harvest_tier: 1,
        }),
    )
    .unwrap();
    env.register_material(
        id("wood"),
        MaterialStats::default().with_handle(HandleStats::default()),
    )
    .unwrap();

    env
}

fn register_modifiers(env: &mut ToolEnv) {
    let stats = env.tool_stats().clone();

    let modifiers = [
        Modifier::new(id("cap_high"), 200).with_module(TierCapModule { max_tier: 2 }),
        Modifier::new(id("cap_low"), 50).with_module(TierCapModule { max_tier: 2 }),
        Modifier::new(id("tier_boost"), 100).with_module(TierBoostModule { bonus: 1 }),
        Modifier::new(id("lit"), 100).with_module(VolatileFlagModule { flag: id("lit") }),
        Modifier::new(id("glow"), 100).with_module(
            StatBoostModule::new(vec![StatBoost::add(
                stats.attack_damage.clone(),
                LevelingValue::flat(5.0),
            )])
            .requiring_flag(id("lit")),
        ),
        Modifier::new(id("sharp"), 100)
            .with_module(StatBoostModule::new(vec![StatBoost::add(
                stats.attack_damage.clone(),
                LevelingValue::each_level(0.5),
            )]))
            .with_module(SharpnessModule {
                bonus: RandomLevelingValue::new(1.0, 0.0, 0.0, 0.0),
            }),
        Modifier::new(id("haste"), 100).with_module(StatBoostModule::new(vec![
            StatBoost::multiply(stats.mining_speed.clone(), LevelingValue::new(1.0, 0.25)),
        ])),
        Modifier::new(id("shovel"), 100)
            .with_module(ToolActionModule::new([id("dig")])),
        Modifier::new(id("axe"), 100).with_module(ToolActionModule::new([id("chop")])),
        Modifier::new(id("tank_a"), 100).with_module(TankModule {
            capacity: LevelingValue::flat(1000.0),
        }),
        Modifier::new(id("tank_b"), 90).with_module(TankModule {
            capacity: LevelingValue::each_level(500.0),
        }),
        Modifier::new(id("setter"), 100).with_module(StatBoostModule::new(vec![StatBoost::set(
            stats.durability.clone(),
            LevelingValue::flat(10.0),
        )])),
        Modifier::new(id("adder"), 100).with_module(StatBoostModule::new(vec![StatBoost::add(
            stats.durability.clone(),
            LevelingValue::flat(5.0),
        )])),
        Modifier::new(id("reinforced"), 100).with_module(ReinforcedModule {
            ignore_chance: LevelingValue::each_level(0.25),
        }),
        Modifier::new(id("unbreakable"), 100)
            .with_module(SetStatModule::new(stats.unbreakable.clone(), true)),
        Modifier::new(id("torch"), 100).with_module(InteractionModule {
            action: id("place_torch"),
        }),
        Modifier::new(id("bucket"), 100).with_module(InteractionModule {
            action: id("fill"),
        }),
        Modifier::new(id("torch_action"), 100).with_module_hooks(
            InteractionModule {
                action: id("place_torch"),
            },
            vec![ModifierHooks::INTERACTION, ModifierHooks::TOOL_ACTION],
        ),
    ];

    for modifier in modifiers {
        env.register_modifier(modifier).unwrap();
    }
}

fn fixture_with(config: ToolConfig) -> Fixture {
    let mut env = base_env(config);
    register_modifiers(&mut env);

    let durability = env.tool_stats().durability.clone();
    let pickaxe = ToolDefinition::new(
        id("pickaxe"),
        vec![PartSlot::Head, PartSlot::Head, PartSlot::Handle],
    )
    .with_base(StatBoost::add(durability, LevelingValue::flat(100.0)));

    Fixture {
        env: env.into_shared(),
        pickaxe: Arc::new(pickaxe),
    }
}

fn fixture() -> Fixture {
    fixture_with(ToolConfig::default())
}

#[test]
fn durability_is_base_plus_mean_of_heads() {
    let f = fixture();
    let materials = [id("iron"), id("flint"), id("wood")];
    let input = ToolInput::new(&f.pickaxe, &materials, &[], f.env.materials());

    let build = f.env.rebuild(&input).unwrap();

    assert_eq!(build.stats.get(&f.env.tool_stats().durability), 175.0);
    assert_eq!(build.stats.get(&f.env.tool_stats().mining_speed), 5.0);
    assert_eq!(build.stats.get(&f.env.tool_stats().harvest_tier), 3);
    assert!(build.hooks.is_empty());
}

#[test]
fn empty_tool_reports_every_default() {
    let f = fixture();
    let bare = ToolDefinition::new(id("bare"), Vec::new());
    let input = ToolInput::with_parts(&bare, PartStatsBySlot::new(), &[]);

    let build = f.env.rebuild(&input).unwrap();

    assert_eq!(build.stats.len(), f.env.stats().len());
    for definition in f.env.stats().iter() {
        assert_eq!(
            build.stats.value(definition.id()),
            Some(definition.default_value()),
            "{} was not left at its default",
            definition.id()
        );
    }
    assert!(build.volatile.is_empty());
    assert!(build.modifiers.is_empty());
}

#[test]
fn rebuild_is_deterministic() {
    let f = fixture();
    let first = f
        .stack(vec![entry("sharp", 2), entry("haste", 1), entry("lit", 1)])
        .unwrap();
    let second = f
        .stack(vec![entry("sharp", 2), entry("haste", 1), entry("lit", 1)])
        .unwrap();

    assert_eq!(first.stats(), second.stats());
    assert_eq!(first.build().modifiers, second.build().modifiers);
    assert_eq!(first.build().volatile, second.build().volatile);
}

#[test]
fn equal_priority_modifiers_ignore_request_order() {
    let f = fixture();
    let durability = f.env.tool_stats().durability.clone();

    let forward = f.stack(vec![entry("setter", 1), entry("adder", 1)]).unwrap();
    let reverse = f.stack(vec![entry("adder", 1), entry("setter", 1)]).unwrap();

    assert_eq!(forward.stats(), reverse.stats());
    assert_eq!(forward.build().modifiers, reverse.build().modifiers);
    // adder sorts first, then the set replaces the running total
    assert_eq!(forward.stat(&durability), 10.0);

    let contributors: Vec<_> = forward
        .hooks()
        .contributors(&ModifierHooks::TOOL_STATS)
        .iter()
        .map(|c| c.source.clone())
        .collect();
    assert_eq!(contributors, vec![id("adder"), id("setter")]);
}

#[test]
fn built_tools_can_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<ModifierHookMap>();
    assert_send_sync::<StatsSnapshot>();
    assert_send_sync::<ToolBuild>();
    assert_send_sync::<ToolEnv>();
    assert_send_sync::<ToolStack>();
}

#[test]
fn harvest_tier_composes_in_priority_order() {
    let f = fixture();

    // cap (200) runs before boost (100): min(3, 2) + 1
    let capped_first = f
        .stack(vec![entry("tier_boost", 1), entry("cap_high", 1)])
        .unwrap();
    assert_eq!(capped_first.harvest_tier(), 3);

    // boost (100) runs before cap (50): min(3 + 1, 2)
    let boosted_first = f
        .stack(vec![entry("cap_low", 1), entry("tier_boost", 1)])
        .unwrap();
    assert_eq!(boosted_first.harvest_tier(), 2);

    let reordered = f
        .stack(vec![entry("cap_high", 1), entry("tier_boost", 1)])
        .unwrap();
    assert_eq!(reordered.harvest_tier(), capped_first.harvest_tier());
}

#[test]
fn volatile_flags_gate_stat_boosts() {
    let f = fixture();
    let attack = f.env.tool_stats().attack_damage.clone();

    let without_flag = f.stack(vec![entry("glow", 1)]).unwrap();
    let with_flag = f.stack(vec![entry("glow", 1), entry("lit", 2)]).unwrap();

    assert_eq!(without_flag.stat(&attack), 1.5);
    assert_eq!(with_flag.stat(&attack), 6.5);
    assert!(with_flag.build().volatile.has_flag(&id("lit")));
    assert_eq!(with_flag.build().volatile.get_int(&id("lit")), 2);
}

#[test]
fn stat_boosts_scale_with_level() {
    let f = fixture();
    let stats = f.env.tool_stats();

    let stack = f.stack(vec![entry("sharp", 4), entry("haste", 2)]).unwrap();

    // mean(2, 1) + 0.5 × 4
    assert_eq!(stack.stat(&stats.attack_damage), 3.5);
    // mean(6, 4) × (1 + 0.25 × 2)
    assert_eq!(stack.stat(&stats.mining_speed), 7.5);
}

#[test]
fn tool_actions_succeed_if_any_module_allows() {
    let f = fixture();
    let stack = f.stack(vec![entry("shovel", 1), entry("axe", 1)]).unwrap();

    assert!(stack.can_perform(&id("dig")));
    assert!(stack.can_perform(&id("chop")));
    assert!(!stack.can_perform(&id("till")));

    let plain = f.stack(Vec::new()).unwrap();
    assert!(!plain.can_perform(&id("dig")));
}

#[test]
fn capacities_add_up() {
    let f = fixture();
    let stack = f.stack(vec![entry("tank_a", 1), entry("tank_b", 2)]).unwrap();
    assert_eq!(stack.capacity(), 2000);

    let contributors: Vec<_> = stack
        .hooks()
        .contributors(&ModifierHooks::CAPACITY)
        .iter()
        .map(|c| c.source.clone())
        .collect();
    assert_eq!(contributors, vec![id("tank_a"), id("tank_b")]);
}

#[test]
fn two_exclusive_owners_fail_the_rebuild() {
    let f = fixture();
    let err = f
        .stack(vec![entry("torch", 1), entry("bucket", 1)])
        .unwrap_err();

    let (hook, contributors) = match err {
        RebuildError::Hook(HookError::AmbiguousHook { hook, contributors }) => (hook, contributors),
        other => panic!("expected ambiguous hook, got {other:?}"),
    };
    assert_eq!(hook, ModifierHooks::INTERACTION);
    assert_eq!(contributors.len(), 2);
    assert!(contributors.iter().any(|c| c.contains("test:torch")));
    assert!(contributors.iter().any(|c| c.contains("test:bucket")));
}

#[test]
fn single_interaction_owner_handles_use() {
    let f = fixture();
    let stack = f.stack(vec![entry("torch", 1)]).unwrap();
    assert_eq!(stack.interact(), InteractionResult::Perform(id("place_torch")));
    assert!(!stack.can_perform(&id("place_torch")));

    let plain = f.stack(Vec::new()).unwrap();
    assert_eq!(plain.interact(), InteractionResult::Pass);
}

#[test]
fn hook_list_override_registers_extra_facets() {
    let f = fixture();
    let stack = f.stack(vec![entry("torch_action", 1)]).unwrap();

    assert_eq!(stack.interact(), InteractionResult::Perform(id("place_torch")));
    assert!(stack.can_perform(&id("place_torch")));
}

#[test]
fn override_with_unsupported_hook_is_rejected_at_registration() {
    let mut env = base_env(ToolConfig::default());
    let modifier = Modifier::new(id("broken"), 100).with_module_hooks(
        TankModule {
            capacity: LevelingValue::flat(1.0),
        },
        vec![ModifierHooks::MELEE_DAMAGE],
    );

    let err = env.register_modifier(modifier).unwrap_err();
    let (modifier, source) = match err {
        EnvError::Modifier(ModifierError::InvalidHooks { modifier, source }) => (modifier, source),
        other => panic!("expected invalid hooks, got {other:?}"),
    };
    assert_eq!(modifier, id("broken"));
    assert!(matches!(
        source,
        HookError::InvalidModuleForHook { ref object, .. } if object == "tank"
    ));
    assert!(!env.modifiers().contains(&id("broken")));
}

#[test]
fn reinforced_chance_is_leveled() {
    let f = fixture();
    let mut rng = StdRng::seed_from_u64(11);

    let mut plain = f.stack(Vec::new()).unwrap();
    assert_eq!(plain.damage(10, &mut rng), 10);

    let mut maxed = f.stack(vec![entry("reinforced", 4)]).unwrap();
    assert_eq!(maxed.damage(10, &mut rng), 0);
    assert_eq!(maxed.current_damage(), 0);

    let mut partial = f.stack(vec![entry("reinforced", 2)]).unwrap();
    let taken = partial.damage(1000, &mut rng);
    assert!(taken > 0 && taken < 1000, "took {taken} of 1000");

    let mut again = f.stack(vec![entry("reinforced", 2)]).unwrap();
    let mut first = StdRng::seed_from_u64(3);
    let mut second = StdRng::seed_from_u64(3);
    let a = again.damage(100, &mut first);
    again.repair(100);
    let b = again.damage(100, &mut second);
    assert_eq!(a, b);
}

#[test]
fn unbreakable_tools_take_no_damage() {
    let f = fixture();
    let mut rng = StdRng::seed_from_u64(1);
    let mut stack = f.stack(vec![entry("unbreakable", 1)]).unwrap();

    assert!(stack.stat(&f.env.tool_stats().unbreakable));
    assert_eq!(stack.damage(500, &mut rng), 0);
    assert!(!stack.is_broken());
}

#[test]
fn damage_is_capped_at_durability() {
    let f = fixture();
    let mut rng = StdRng::seed_from_u64(1);
    let mut stack = f.stack(Vec::new()).unwrap();

    assert_eq!(stack.damage(1000, &mut rng), 175);
    assert!(stack.is_broken());
    assert_eq!(stack.durability_left(), 0);

    stack.repair(25);
    assert_eq!(stack.durability_left(), 25);
    assert!(!stack.is_broken());
}

#[test]
fn oversized_damage_stops_at_durability_left() {
    let f = fixture();
    let mut rng = StdRng::seed_from_u64(5);

    let mut plain = f.stack(Vec::new()).unwrap();
    assert_eq!(plain.damage(u32::MAX, &mut rng), 175);
    assert!(plain.is_broken());
    assert_eq!(plain.damage(u32::MAX, &mut rng), 0);

    let mut reinforced = f.stack(vec![entry("reinforced", 2)]).unwrap();
    let taken = reinforced.damage(u32::MAX, &mut rng);
    assert!(taken <= 175, "took {taken}");
    assert_eq!(reinforced.current_damage(), taken);
}

#[test]
fn melee_damage_adds_rolled_bonus() {
    let f = fixture();
    let mut rng = StdRng::seed_from_u64(5);
    let stack = f.stack(vec![entry("sharp", 2)]).unwrap();

    // (mean(2, 1) + 0.5 × 2) + 1
    assert_eq!(stack.melee_damage(&mut rng), 3.5);
}

#[test]
fn level_zero_entries_contribute_nothing() {
    let f = fixture();
    let stack = f.stack(vec![entry("sharp", 0), entry("shovel", 0)]).unwrap();

    assert!(stack.build().modifiers.is_empty());
    assert!(stack.hooks().is_empty());
    assert!(!stack.can_perform(&id("dig")));
}

#[test]
fn limits_are_enforced() {
    let f = fixture_with(ToolConfig::default().with_max_modifiers(2).with_max_level(3));

    assert_eq!(
        f.stack(vec![entry("sharp", 1), entry("haste", 1), entry("lit", 1)])
            .unwrap_err(),
        RebuildError::TooManyModifiers { count: 3, max: 2 }
    );
    assert_eq!(
        f.stack(vec![entry("sharp", 4)]).unwrap_err(),
        RebuildError::LevelTooHigh {
            modifier: id("sharp"),
            level: 4,
            max: 3,
        }
    );
    assert_eq!(
        f.stack(vec![entry("missing", 1)]).unwrap_err(),
        RebuildError::UnknownModifier {
            modifier: id("missing"),
        }
    );
}

#[test]
fn unknown_material_fails_the_rebuild() {
    let f = fixture();
    let materials = [id("iron"), id("mithril")];
    let input = ToolInput::new(&f.pickaxe, &materials, &[], f.env.materials());

    assert_eq!(
        f.env.rebuild(&input).unwrap_err(),
        RebuildError::UnknownMaterial {
            material: id("mithril"),
        }
    );
}
