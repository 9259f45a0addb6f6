use blockdump_blocks::registry::{RawBlock, RawState};
use blockdump_blocks::types::{MaterialDescriptor, RawProperty, RawValue};
use blockdump_blocks::{ExtractError, MaterialCatalog, MaterialNames, RegistrySnapshot};
use blockdump_extract::{BlockRecord, Channel, ExtractOptions, Extractor, Snapshot};
use blockdump_geom::Aabb;
use std::collections::HashMap;

fn materials() -> HashMap<String, MaterialDescriptor> {
    HashMap::from([
        ("AIR".to_string(), MaterialDescriptor::default()),
        (
            "DECORATION".to_string(),
            MaterialDescriptor {
                map_color: 0,
                ..Default::default()
            },
        ),
        (
            "STONE".to_string(),
            MaterialDescriptor {
                blocks_movement: true,
                blocks_light: true,
                solid: true,
                map_color: 11,
                ..Default::default()
            },
        ),
    ])
}

fn solid() -> RawState {
    RawState {
        opaque: true,
        full_cube: true,
        opacity: 15,
        culling_shape: vec![Aabb::FULL_BLOCK],
        ..Default::default()
    }
}

fn torch(id: &str) -> RawBlock {
    RawBlock::uniform(id, "DECORATION", vec![], HashMap::new(), &RawState {
        luminance: 14,
        ..Default::default()
    })
}

fn slab(id: &str) -> RawBlock {
    let mut b = RawBlock::uniform(
        id,
        "STONE",
        vec![
            RawProperty::enumeration("type", "SlabType", &["top", "bottom", "double"]),
            RawProperty::bool("waterlogged"),
        ],
        HashMap::from([
            ("type".to_string(), RawValue::from("bottom")),
            ("waterlogged".to_string(), RawValue::Bool(false)),
        ]),
        &RawState::default(),
    );
    for s in &mut b.states {
        let boxes = match &s.values["type"] {
            RawValue::Str(t) if t == "top" => vec![Aabb::from_array([0.0, 0.5, 0.0, 1.0, 1.0, 1.0])],
            RawValue::Str(t) if t == "bottom" => vec![Aabb::from_array([0.0, 0.0, 0.0, 1.0, 0.5, 1.0])],
            _ => vec![Aabb::FULL_BLOCK],
        };
        s.culling_shape = boxes;
        s.has_fluid = s.values["waterlogged"] == RawValue::Bool(true);
    }
    b
}

fn registry() -> RegistrySnapshot {
    RegistrySnapshot {
        version: "1.18.2".into(),
        world_version: 2975,
        materials: materials(),
        blocks: vec![
            RawBlock::uniform("minecraft:air", "AIR", vec![], HashMap::new(), &RawState::default()),
            RawBlock::uniform("minecraft:stone", "STONE", vec![], HashMap::new(), &solid()),
            torch("minecraft:legacy_torch"),
            slab("minecraft:stone_slab"),
            torch("minecraft:torch"),
            RawBlock::uniform("mymod:granite", "STONE", vec![], HashMap::new(), &solid()),
        ],
    }
}

fn find<'a>(snap: &'a Snapshot, alias: &str) -> &'a BlockRecord {
    snap.blocks
        .iter()
        .find(|b| b.names.iter().any(|n| n == alias))
        .unwrap()
}

fn catalog(reg: &RegistrySnapshot) -> MaterialCatalog {
    MaterialCatalog::build(&MaterialNames::builtin(), &reg.materials)
}

#[test]
fn end_to_end_snapshot() {
    let reg = registry();
    let cat = catalog(&reg);
    let snap = Extractor::new(&cat, ExtractOptions::default())
        .run(&reg)
        .unwrap();

    assert_eq!(snap.version, "1.18.2");
    assert_eq!(snap.world_version, 2975);
    // air 1 + stone 1 + legacy_torch 1 + slab 6 + torch 1 + granite 1
    assert_eq!(snap.num_block_states, 11);

    let names: Vec<Vec<String>> = snap.blocks.iter().map(|b| b.names.clone()).collect();
    assert_eq!(
        names,
        vec![
            vec!["air".to_string()],
            vec!["stone".to_string(), "mymod:granite".to_string()],
            vec!["legacy_torch".to_string(), "torch".to_string()],
            vec!["stone_slab".to_string()],
        ]
    );

    let torch = find(&snap, "torch");
    assert_eq!(torch.default_state_id, 0);
    assert_eq!(torch.states.light, Channel::Uniform(14 << 4));

    // Shapes in first-seen order: empty (air), full (stone), then slab top/bottom
    let shapes = snap.shapes.as_ref().unwrap();
    assert_eq!(
        shapes,
        &vec![
            vec![],
            vec![0, 0, 0, 16, 16, 16],
            vec![0, 8, 0, 16, 16, 16],
            vec![0, 0, 0, 16, 8, 16],
        ]
    );

    let slab = find(&snap, "stone_slab");
    assert_eq!(slab.num_states, 6);
    // type=bottom (1) + waterlogged=false (1) * 3
    assert_eq!(slab.default_state_id, 4);
    assert_eq!(
        slab.states.occlusion_shapes,
        Some(Channel::PerState(vec![2, 3, 1, 2, 3, 1]))
    );
    assert_eq!(
        slab.states.flags,
        Channel::PerState(vec![64, 64, 64, 0, 0, 0])
    );
    assert_eq!(slab.states.light, Channel::Uniform(0));

    let mats: Vec<&str> = snap.materials.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(mats, vec!["air", "decoration", "stone"]);
}

#[test]
fn parallel_and_sequential_agree() {
    let reg = registry();
    let cat = catalog(&reg);
    let par = Extractor::new(&cat, ExtractOptions::default())
        .run(&reg)
        .unwrap();
    let seq = Extractor::new(
        &cat,
        ExtractOptions {
            parallel: false,
            ..Default::default()
        },
    )
    .run(&reg)
    .unwrap();
    assert_eq!(par, seq);
}

#[test]
fn without_interning_no_shapes_are_emitted() {
    let reg = registry();
    let cat = catalog(&reg);
    let snap = Extractor::new(
        &cat,
        ExtractOptions {
            intern_shapes: false,
            ..Default::default()
        },
    )
    .run(&reg)
    .unwrap();
    assert!(snap.shapes.is_none());
    assert!(snap.blocks.iter().all(|b| b.states.occlusion_shapes.is_none()));
    let json = serde_json::to_value(&snap).unwrap();
    assert!(json.get("shapes").is_none());
    assert!(json["blocks"][0]["states"].get("occlusionShapes").is_none());
}

#[test]
fn unknown_material_aborts_run() {
    let mut reg = registry();
    reg.blocks.push(RawBlock::uniform(
        "minecraft:glass",
        "GLASS",
        vec![],
        HashMap::new(),
        &RawState::default(),
    ));
    let cat = catalog(&reg);
    let err = Extractor::new(&cat, ExtractOptions::default())
        .run(&reg)
        .unwrap_err();
    match err {
        ExtractError::UnknownMaterial { block, material } => {
            assert_eq!(block, "minecraft:glass");
            assert_eq!(material, "GLASS");
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn first_error_in_registry_order_wins() {
    let mut reg = registry();
    let mut bad_bool = RawBlock::uniform(
        "minecraft:lamp",
        "STONE",
        vec![RawProperty::bool("lit")],
        HashMap::from([("lit".to_string(), RawValue::Bool(false))]),
        &solid(),
    );
    if let blockdump_blocks::RawDomain::Bool { values } = &mut bad_bool.properties[0].domain {
        values.reverse();
    }
    reg.blocks.insert(1, bad_bool);
    reg.blocks.push(RawBlock::uniform(
        "minecraft:glass",
        "GLASS",
        vec![],
        HashMap::new(),
        &RawState::default(),
    ));
    let cat = catalog(&reg);
    let err = Extractor::new(&cat, ExtractOptions::default())
        .run(&reg)
        .unwrap_err();
    assert!(matches!(err, ExtractError::DomainOrder { .. }));
}

#[test]
fn record_json_layout() {
    let reg = RegistrySnapshot {
        version: "v".into(),
        world_version: 1,
        materials: materials(),
        blocks: vec![RawBlock::uniform(
            "minecraft:wheat",
            "DECORATION",
            vec![
                RawProperty::int("age", 0, 7),
                RawProperty::enumeration("facing", "Direction", &["north", "south"]),
                RawProperty::bool("lit"),
            ],
            HashMap::from([
                ("age".to_string(), RawValue::Int(0)),
                ("facing".to_string(), RawValue::from("north")),
                ("lit".to_string(), RawValue::Bool(true)),
            ]),
            &RawState::default(),
        )],
    };
    let cat = catalog(&reg);
    let snap = Extractor::new(&cat, ExtractOptions::default())
        .run(&reg)
        .unwrap();
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["numBlockStates"], 32);
    let block = &json["blocks"][0];
    assert_eq!(block["names"], serde_json::json!(["wheat"]));
    assert_eq!(block["numStates"], 32);
    assert_eq!(block["defaultStateId"], 0);
    assert_eq!(block["material"], "decoration");
    assert_eq!(
        block["properties"],
        serde_json::json!([
            { "name": "age", "type": "int", "min": 0, "max": 7 },
            { "name": "facing", "type": "enum", "enumType": "Direction", "values": ["north", "south"] },
            { "name": "lit", "type": "bool" },
        ])
    );
    assert_eq!(
        block["states"],
        serde_json::json!({ "flags": 0, "light": 0, "occlusionShapes": 0 })
    );
    assert_eq!(
        json["materials"][1],
        serde_json::json!({ "name": "decoration", "attribs": 0, "mapColor": 0 })
    );
}
