//! Converts the search index's wire shape into the domain model. Candidates
//! are pre-standardized upstream, so this is a field-for-field reshaping,
//! not interpretation.

use attrmodel::{ProductAttribute, ProductCandidate};
use clients::{RawCandidate, RawCandidateAttribute};

pub fn into_product_candidate(raw: RawCandidate) -> ProductCandidate {
    ProductCandidate {
        id: raw.id,
        mongo_id: raw.mongo_id,
        title: raw.title,
        category: raw.category,
        yandex_category: raw.yandex_category,
        attributes: raw.attributes.into_iter().map(into_product_attribute).collect(),
        retrieval_score: raw.retrieval_score,
    }
}

fn into_product_attribute(raw: RawCandidateAttribute) -> ProductAttribute {
    ProductAttribute {
        original_name: raw.original_name,
        original_value: raw.original_value,
        standardized_name: raw.standardized_name,
        standardized_value: raw.standardized_value,
        standardized_unit: raw.standardized_unit,
        attribute_type: raw.attribute_type,
        value_lemma: raw.value_lemma,
        value_stem: raw.value_stem,
    }
}
