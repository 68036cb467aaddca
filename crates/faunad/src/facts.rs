//! Built-in reference facts for common species.
//!
//! The offline tier of the fact cascade: a fixed, hand-curated table of
//! species the service should always be able to describe, even with no
//! network and no credential. Names and descriptions are carried from the
//! service's original French catalogue.

use fauna_common::{AnimalFacts, SpeciesKey};

struct ReferenceEntry {
    key: &'static str,
    name: &'static str,
    species: &'static str,
    size: &'static str,
    weight: &'static str,
    description: &'static str,
}

const REFERENCE_TABLE: &[ReferenceEntry] = &[
    ReferenceEntry {
        key: "chat",
        name: "Chat",
        species: "Felis catus",
        size: "25-30 cm",
        weight: "3.5-5 kg",
        description: "Félin domestique carnivore, animal de compagnie très populaire.",
    },
    ReferenceEntry {
        key: "chien",
        name: "Chien",
        species: "Canis familiaris",
        size: "15-90 cm",
        weight: "2-90 kg",
        description: "Mammifère carnivore, fidèle compagnon de l'homme depuis des millénaires.",
    },
    ReferenceEntry {
        key: "lion",
        name: "Lion",
        species: "Panthera leo",
        size: "1.7-2.5 m",
        weight: "190-250 kg",
        description: "Grand félin africain, roi de la savane, animal social vivant en groupes.",
    },
    ReferenceEntry {
        key: "elephant",
        name: "Éléphant",
        species: "Loxodonta africana",
        size: "6-7 m",
        weight: "4000-7000 kg",
        description: "Plus grand animal terrestre, herbivore intelligent et sociable.",
    },
    ReferenceEntry {
        key: "tigre",
        name: "Tigre",
        species: "Panthera tigris",
        size: "1.4-2.8 m",
        weight: "65-300 kg",
        description: "Félin asiatique majestueux, prédateur solitaire et puissant.",
    },
    ReferenceEntry {
        key: "ours",
        name: "Ours",
        species: "Ursus arctos",
        size: "1.5-2.8 m",
        weight: "200-600 kg",
        description: "Mammifère puissant, omnivore, symbole de force et de nature sauvage.",
    },
    ReferenceEntry {
        key: "girafe",
        name: "Girafe",
        species: "Giraffa camelopardalis",
        size: "4.5-5.5 m",
        weight: "700-900 kg",
        description: "Animal herbivore au long cou, le plus haut quadrupède terrestre.",
    },
    ReferenceEntry {
        key: "zebre",
        name: "Zèbre",
        species: "Equus quagga",
        size: "2.2-2.5 m",
        weight: "350-450 kg",
        description: "Équidé noir et blanc, animal herbivore vivant en troupeaux.",
    },
    ReferenceEntry {
        key: "hippopotame",
        name: "Hippopotame",
        species: "Hippopotamus amphibius",
        size: "3.5-4.2 m",
        weight: "1500-1800 kg",
        description: "Mammifère semi-aquatique africain, herbivore agressif.",
    },
    ReferenceEntry {
        key: "crocodile",
        name: "Crocodile",
        species: "Crocodylus niloticus",
        size: "2-5 m",
        weight: "200-1000 kg",
        description: "Reptile prédateur vivant dans l'eau, chasseur redoutable.",
    },
    ReferenceEntry {
        key: "singe",
        name: "Singe",
        species: "Primates",
        size: "0.5-1.8 m",
        weight: "2-100 kg",
        description: "Primate intelligent, agile et vivant en groupes sociaux.",
    },
    ReferenceEntry {
        key: "leopard",
        name: "Léopard",
        species: "Panthera pardus",
        size: "0.9-1.3 m",
        weight: "30-90 kg",
        description: "Félin tacheté africain, chasseur solitaire et nocturne.",
    },
    ReferenceEntry {
        key: "panthere",
        name: "Panthère",
        species: "Panthera pardus",
        size: "0.9-1.3 m",
        weight: "30-90 kg",
        description: "Léopard noir ou variante sombre du félin tacheté.",
    },
    ReferenceEntry {
        key: "rhinoceros",
        name: "Rhinocéros",
        species: "Rhinocerotidae",
        size: "2.5-3.7 m",
        weight: "1000-2300 kg",
        description: "Grand herbivore à peau épaisse, doté d'une ou deux cornes.",
    },
    ReferenceEntry {
        key: "antilope",
        name: "Antilope",
        species: "Bovidae",
        size: "0.6-1.5 m",
        weight: "20-350 kg",
        description: "Artiodactyle herbivore africain, animal rapide et gracieux.",
    },
    ReferenceEntry {
        key: "buffle",
        name: "Buffle",
        species: "Syncerus caffer",
        size: "2.1-2.7 m",
        weight: "500-900 kg",
        description: "Bovidé africain puissant, herbivore vivant en troupeaux.",
    },
    ReferenceEntry {
        key: "hyene",
        name: "Hyène",
        species: "Crocuta crocuta",
        size: "1.1-1.4 m",
        weight: "40-90 kg",
        description: "Carnivore africain avec une mâchoire puissante.",
    },
    ReferenceEntry {
        key: "autruche",
        name: "Autruche",
        species: "Struthio camelus",
        size: "2-2.8 m",
        weight: "100-160 kg",
        description: "Plus grand oiseau terrestre, incapable de voler mais très rapide.",
    },
    ReferenceEntry {
        key: "serpent",
        name: "Serpent",
        species: "Serpentes",
        size: "0.2-10 m",
        weight: "0.1-250 kg",
        description: "Reptile sans membres, carnivore vivant dans divers habitats.",
    },
    ReferenceEntry {
        key: "python",
        name: "Python",
        species: "Pythonidae",
        size: "1-6 m",
        weight: "1-100 kg",
        description: "Serpent constricteur non venimeux, prédateur de petits animaux.",
    },
];

/// Look up a species in the reference table.
pub fn lookup(key: &SpeciesKey) -> Option<AnimalFacts> {
    REFERENCE_TABLE
        .iter()
        .find(|entry| entry.key == key.as_str())
        .map(|entry| AnimalFacts {
            name: entry.name.to_string(),
            species: entry.species.to_string(),
            size: entry.size.to_string(),
            weight: entry.weight.to_string(),
            description: entry.description.to_string(),
        })
}

/// Synthesize a record for a species the table does not know. Every field
/// is filled so callers never see an empty value.
pub fn unknown(name: &str) -> AnimalFacts {
    AnimalFacts {
        name: capitalize(name.trim()),
        species: "Espèce inconnue".to_string(),
        size: "Inconnue".to_string(),
        weight: "Inconnue".to_string(),
        description: "Cet animal n'est pas dans notre base de données.".to_string(),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
