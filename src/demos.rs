//! Bundled example programs

/// An example program shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Demo {
    pub key: &'static str,
    pub name: &'static str,
    pub source: &'static str,
}

pub const DEMOS: &[Demo] = &[
    Demo {
        key: "simple_io",
        name: "Simple I/O",
        source: include_str!("../demos/simple_io.cf"),
    },
    Demo {
        key: "conditional",
        name: "If/Else Statement",
        source: include_str!("../demos/conditional.cf"),
    },
    Demo {
        key: "loop",
        name: "While Loop",
        source: include_str!("../demos/loop.cf"),
    },
    Demo {
        key: "factorial",
        name: "Factorial Calculator",
        source: include_str!("../demos/factorial.cf"),
    },
];

/// Look up a demo by key
pub fn find(key: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.key == key)
}
