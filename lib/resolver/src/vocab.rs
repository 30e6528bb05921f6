//! The fixed vocabulary used by the resolution queries.

pub mod besluit {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://data.vlaanderen.be/ns/besluit#";

    /// The classification code of governing units that are municipalities ("gemeente").
    pub const MUNICIPALITY_CLASSIFICATION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://data.vlaanderen.be/id/concept/BestuurseenheidClassificatieCode/5ab0e9b8a3b2ca7c5e000001",
    );
    /// The classification code of governing bodies that are municipal councils ("Gemeenteraad").
    pub const MUNICIPAL_COUNCIL_CLASSIFICATION: NamedNodeRef<'_> = NamedNodeRef::new_unchecked(
        "http://data.vlaanderen.be/id/concept/BestuursorgaanClassificatieCode/5ab0e9b8a3b2ca7c5e000005",
    );
}

pub mod mandaat {
    pub const NAMESPACE: &str = "http://data.vlaanderen.be/ns/mandaat#";
}

pub mod eli {
    pub const NAMESPACE: &str = "http://data.europa.eu/eli/ontology#";
}

pub mod ext {
    pub const NAMESPACE: &str = "http://mu.semte.ch/vocabularies/ext/";

    /// The operating-area level of the areas municipalities govern.
    pub const MUNICIPALITY_LEVEL: &str = "Gemeente";
}

pub mod prov {
    pub const NAMESPACE: &str = "http://www.w3.org/ns/prov#";
}

pub mod rdfs {
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";
}

pub mod skos {
    pub const NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";
}
