mod handle;
mod threads;
mod traits;

/// Test fixture: an organism keyed by its scientific name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organism {
    pub genus: &'static str,
    pub species: &'static str,
    pub extinct: bool,
}

pub const fn human() -> Organism {
    Organism {
        genus: "Homo",
        species: "sapiens",
        extinct: false,
    }
}

pub const fn dog() -> Organism {
    Organism {
        genus: "Canis",
        species: "lupus familiaris",
        extinct: false,
    }
}

pub const fn direwolf() -> Organism {
    Organism {
        genus: "Canis",
        species: "dirus",
        extinct: true,
    }
}

pub fn scientific_name(o: &Organism) -> String {
    format!("{} {}", o.genus, o.species)
}

/// Installs a test-writer subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
