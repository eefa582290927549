use prism_domain::config::GeneratorConfig;
use prism_generator::DescriptorGenerator;
use prism_parser::ShapeParser;
use prism_schema::SchemaRegistry;
use proptest::prelude::*;
use std::sync::Arc;

fn generator(config: &GeneratorConfig) -> DescriptorGenerator {
    DescriptorGenerator::from_config(Arc::new(SchemaRegistry::builtin()), config)
}

const SHAPES: &[&str] = &[
    "key",
    "piid",
    "key,piid",
    "recipient(uei)",
    "recipient(*)",
    "award_date::signed",
    "transactions(obligated)",
    "*",
];

#[test]
fn repeated_generation_returns_same_instance() {
    let parser = ShapeParser::new();
    let g = generator(&GeneratorConfig::default());
    let spec = parser.parse("key,recipient(display_name)").unwrap();

    let first = g.generate("Contract", &spec).unwrap();
    let second = g.generate("Contract", &spec).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // An equal spec from a separate parse hits the same entry.
    let reparsed = ShapeParser::with_cache(false).parse("key , recipient( display_name )").unwrap();
    assert!(Arc::ptr_eq(&first, &g.generate("Contract", &reparsed).unwrap()));
}

#[test]
fn flags_and_base_type_are_part_of_the_key() {
    let parser = ShapeParser::new();
    let g = generator(&GeneratorConfig::default());

    let nested = g.generate("Contract", &parser.parse("key").unwrap()).unwrap();
    let flat = g.generate("Contract", &parser.parse_with_flags("key", true, false).unwrap()).unwrap();
    let idv = g.generate("IDV", &parser.parse("key").unwrap()).unwrap();

    assert!(!Arc::ptr_eq(&nested, &flat));
    assert!(flat.is_flat);
    assert_eq!(idv.model_name, "IDV");
    assert_eq!(g.cache_len(), 3);
}

#[test]
fn fifo_eviction_drops_oldest_insertion() {
    let parser = ShapeParser::new();
    let config = GeneratorConfig { cache_size: 2, ..GeneratorConfig::default() };
    let g = generator(&config);

    let a = g.generate("Contract", &parser.parse("key").unwrap()).unwrap();
    let b = g.generate("Contract", &parser.parse("piid").unwrap()).unwrap();

    // Touching "key" does not save it from eviction.
    assert!(Arc::ptr_eq(&a, &g.generate("Contract", &parser.parse("key").unwrap()).unwrap()));
    g.generate("Contract", &parser.parse("description").unwrap()).unwrap();

    assert_eq!(g.cache_len(), 2);
    let a_again = g.generate("Contract", &parser.parse("key").unwrap()).unwrap();
    assert!(!Arc::ptr_eq(&a, &a_again), "oldest entry was evicted and rebuilt");
    assert_eq!(*a, *a_again);

    // Re-inserting "key" evicted "piid".
    let b_again = g.generate("Contract", &parser.parse("piid").unwrap()).unwrap();
    assert!(!Arc::ptr_eq(&b, &b_again));
}

#[test]
fn disabled_cache_rebuilds_every_time() {
    let parser = ShapeParser::new();
    let config = GeneratorConfig { cache_enabled: false, ..GeneratorConfig::default() };
    let g = generator(&config);
    let spec = parser.parse("key").unwrap();

    let first = g.generate("Contract", &spec).unwrap();
    let second = g.generate("Contract", &spec).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_eq!(g.cache_len(), 0);
}

#[test]
fn concurrent_generation_converges_on_one_instance() {
    let g = Arc::new(generator(&GeneratorConfig::default()));
    let spec = Arc::new(ShapeParser::new().parse("key,recipient(*)").unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let g = Arc::clone(&g);
            let spec = Arc::clone(&spec);
            std::thread::spawn(move || g.generate("Contract", &spec).unwrap())
        })
        .collect();
    let models: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let cached = g.generate("Contract", &spec).unwrap();
    assert!(models.iter().all(|m| Arc::ptr_eq(m, &cached)));
}

proptest! {
    #[test]
    fn descriptor_identity_under_caching(picks in proptest::collection::vec(0..SHAPES.len(), 1..24)) {
        let parser = ShapeParser::new();
        let g = generator(&GeneratorConfig::default());
        let mut seen = std::collections::HashMap::new();

        for i in picks {
            let model = g.generate("Contract", &parser.parse(SHAPES[i]).unwrap()).unwrap();
            let first = seen.entry(i).or_insert_with(|| Arc::clone(&model));
            prop_assert!(Arc::ptr_eq(first, &model));
        }
        prop_assert!(g.cache_len() <= SHAPES.len());
    }
}
