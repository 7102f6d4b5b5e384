// ==========================================
// Catalog Import - Fuzzy Entity Resolver
// ==========================================
// Contract: best trigram match over stored names, accepted only when
// similarity is strictly above 0.80
// Tie-break: lowest id wins (candidates arrive in ascending id order)
// Soft failure: an unavailable similarity search degrades to "no match"
// ==========================================

use crate::domain::catalog::EntityKind;
use crate::importer::similarity::trigram_similarity;
use crate::repository::catalog_repo::CatalogRepository;
use tracing::debug;

/// Acceptance threshold; exclusive, a candidate at exactly 0.80 is rejected.
pub const SIMILARITY_THRESHOLD: f64 = 0.80;

/// A stored entity accepted as the same real-world entity as a row name.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMatch {
    pub id: i64,
    pub name: String,
    pub similarity: f64,
}

// ==========================================
// FuzzyEntityResolver
// ==========================================
pub struct FuzzyEntityResolver<'a, R: CatalogRepository> {
    repo: &'a R,
}

impl<'a, R: CatalogRepository> FuzzyEntityResolver<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Best similarity-above-threshold match for `name`, or `None`.
    pub fn find(&self, kind: EntityKind, name: &str) -> Option<EntityMatch> {
        let candidates = match self.repo.candidate_names(kind) {
            Ok(candidates) => candidates,
            Err(e) => {
                debug!(
                    kind = kind.as_str(),
                    name = %name,
                    error = %e,
                    "similarity search unavailable, treating as no match"
                );
                return None;
            }
        };

        let mut best: Option<EntityMatch> = None;
        for (id, candidate) in candidates {
            let similarity = trigram_similarity(name, &candidate);
            // strictly-greater keeps the earliest (lowest-id) candidate on ties
            if best.as_ref().map_or(true, |b| similarity > b.similarity) {
                best = Some(EntityMatch {
                    id,
                    name: candidate,
                    similarity,
                });
            }
        }

        best.filter(|m| m.similarity > SIMILARITY_THRESHOLD)
    }
}
