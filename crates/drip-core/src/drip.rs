//! ============================================================================
//! Drip Service - The single report operation
//! ============================================================================
//! Catalog and profile are fetched concurrently; both must succeed before
//! aggregation starts. Every structure is built fresh per call and dropped
//! when the report is returned. Nothing is retried: a failed fetch fails the
//! whole report.
//! ============================================================================

use tracing::info;

use crate::bungie::{BungieClient, BungieFetch};
use crate::config::DripConfig;
use crate::cosmetics::{Aggregator, Classifier, DripReport, HeuristicVocabulary, OrnamentArmorIndex, OwnershipState};
use crate::manifest::{available_languages, fetch_manifest, load_catalog};
use crate::profile::{fetch_profile, MembershipRef};
use crate::types::Result;

/// Produce the cosmetics report for one account
pub async fn load_drip_report(
    fetch: &dyn BungieFetch,
    classifier: &Classifier,
    access_token: &str,
    membership: &MembershipRef,
    language: &str,
) -> Result<DripReport> {
    let (catalog, profile) = tokio::try_join!(
        load_catalog(fetch, access_token, language),
        fetch_profile(fetch, access_token, membership),
    )?;

    let ownership = OwnershipState::from_profile(&profile);
    let ornaments = OrnamentArmorIndex::build(&catalog, classifier);
    info!(
        "Aggregating {} collectibles against {} catalog items",
        ownership.len(),
        catalog.items.len()
    );

    Ok(Aggregator::new(&catalog, &ornaments, classifier).aggregate(&ownership, &profile))
}

/// Fetch capability plus classification settings
pub struct DripService {
    fetch: Box<dyn BungieFetch>,
    classifier: Classifier,
    language: String,
}

impl DripService {
    /// Build a service over the real Bungie client, loading the vocabulary
    /// override when one is configured
    pub fn from_config(config: &DripConfig) -> Result<Self> {
        let vocabulary = match &config.vocabulary_path {
            Some(path) => {
                let vocabulary = HeuristicVocabulary::load(path)?;
                info!("Using heuristic vocabulary {} from {}", vocabulary.version, path.display());
                vocabulary
            }
            None => HeuristicVocabulary::default(),
        };

        Ok(Self::with_fetch(
            Box::new(BungieClient::new(config)),
            Classifier::new(vocabulary),
            config.language.clone(),
        ))
    }

    pub fn with_fetch(fetch: Box<dyn BungieFetch>, classifier: Classifier, language: String) -> Self {
        Self {
            fetch,
            classifier,
            language,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub async fn report(&self, access_token: &str, membership: &MembershipRef) -> Result<DripReport> {
        load_drip_report(
            self.fetch.as_ref(),
            &self.classifier,
            access_token,
            membership,
            &self.language,
        )
        .await
    }

    /// Languages the manifest offers content for
    pub async fn languages(&self, access_token: &str) -> Result<Vec<String>> {
        let manifest = fetch_manifest(self.fetch.as_ref(), access_token).await?;
        Ok(available_languages(&manifest))
    }
}
