//! Pipeline orchestration.

use std::sync::Arc;
use std::time::Duration;

use doppelcheck_crypto::{hash_canonical, CanonicalError};
use doppelcheck_evidence::EvidenceVault;
use doppelcheck_models::{ModelGateway, ProviderFactory, StaticEngine};
use doppelcheck_protocol::{validate_and_normalize, ClaimExtractor, WholeTextExtractor};
use doppelcheck_trust::{Scorers, TrustLedger};
use doppelcheck_types::{Clock, Fingerprint, RawSource, SystemClock};
use doppelcheck_utils::{stage_span, verify_span};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::Instrument;

use crate::backend::open_backend;
use crate::config::{DuplicatePolicy, VerifierConfig};
use crate::error::{PipelineError, StageError, VerifierError};
use crate::report::VerificationReport;
use crate::single_flight::{Admission, SingleFlight};
use crate::state::{PipelineRun, VerificationPhase};

type Outcome = Result<VerificationReport, PipelineError>;

#[derive(Serialize)]
struct RequestKey<'a> {
    claim: &'a str,
    sources: &'a [RawSource],
}

/// Single-flight key of a request: `SHA-256(canonical({claim, sources}))`
/// over the raw sources. Context does not take part.
pub fn request_fingerprint(
    claim: &str,
    sources: &[RawSource],
) -> Result<Fingerprint, CanonicalError> {
    hash_canonical(&RequestKey { claim, sources })
}

/// Runs claims through extraction, normalization, trust ledger, model and
/// evidence vault.
///
/// `Send + Sync`; share one instance behind an `Arc` across tasks.
pub struct Verifier {
    extractor: Arc<dyn ClaimExtractor>,
    gateway: ModelGateway,
    vault: EvidenceVault,
    scorers: Scorers,
    clock: Arc<dyn Clock>,
    duplicate_policy: DuplicatePolicy,
    trust_threshold: f64,
    flights: SingleFlight<Outcome>,
}

pub struct VerifierBuilder {
    gateway: ModelGateway,
    vault: EvidenceVault,
    extractor: Arc<dyn ClaimExtractor>,
    scorers: Scorers,
    clock: Arc<dyn Clock>,
    duplicate_policy: DuplicatePolicy,
    trust_threshold: f64,
}

impl VerifierBuilder {
    pub fn extractor(mut self, extractor: Arc<dyn ClaimExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn scorers(mut self, scorers: Scorers) -> Self {
        self.scorers = scorers;
        self
    }

    /// Clock for chain build times and report timestamps.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn trust_threshold(mut self, threshold: f64) -> Self {
        self.trust_threshold = threshold;
        self
    }

    pub fn build(self) -> Verifier {
        Verifier {
            extractor: self.extractor,
            gateway: self.gateway,
            vault: self.vault,
            scorers: self.scorers,
            clock: self.clock,
            duplicate_policy: self.duplicate_policy,
            trust_threshold: self.trust_threshold,
            flights: SingleFlight::new(),
        }
    }
}

impl Verifier {
    pub fn builder(gateway: ModelGateway, vault: EvidenceVault) -> VerifierBuilder {
        let defaults = VerifierConfig::default();
        VerifierBuilder {
            gateway,
            vault,
            extractor: Arc::new(WholeTextExtractor),
            scorers: Scorers::default(),
            clock: Arc::new(SystemClock),
            duplicate_policy: defaults.duplicate_policy,
            trust_threshold: defaults.trust_threshold,
        }
    }

    /// Resolve the model, open the evidence backend and wire everything up.
    ///
    /// Every configuration fault surfaces here, before any request runs.
    pub fn from_config(config: &VerifierConfig) -> Result<Self, VerifierError> {
        config.validate()?;
        let factory = ProviderFactory::new(
            config.cloud.clone(),
            Arc::new(StaticEngine::new(config.local.clone())),
        );
        let gateway =
            ModelGateway::from_identifier(&config.model, &factory, config.provider_timeout())?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let vault = EvidenceVault::new(open_backend(&config.evidence_url)?, Arc::clone(&clock));
        Ok(Self::builder(gateway, vault)
            .clock(clock)
            .duplicate_policy(config.duplicate_policy)
            .trust_threshold(config.trust_threshold)
            .build())
    }

    pub fn vault(&self) -> &EvidenceVault {
        &self.vault
    }

    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    pub fn trust_threshold(&self) -> f64 {
        self.trust_threshold
    }

    /// Verify `claim` against `sources` with the gateway's default deadline.
    pub async fn verify(
        &self,
        claim: &str,
        sources: &[RawSource],
        context: Option<&Map<String, Value>>,
    ) -> Result<VerificationReport, PipelineError> {
        self.verify_with_deadline(claim, sources, context, None).await
    }

    /// Like [`verify`](Self::verify), with an explicit model deadline.
    ///
    /// Dropping the returned future cancels the request. Requests joined to it
    /// then fail with `Cancelled`.
    ///
    /// The in-flight key covers only `claim` and `sources`. Under
    /// [`DuplicatePolicy::Join`] a request that joins an identical one already
    /// running receives that leader's report, computed with the leader's
    /// `context` and `deadline`; its own `context` and `deadline` are not used.
    pub async fn verify_with_deadline(
        &self,
        claim: &str,
        sources: &[RawSource],
        context: Option<&Map<String, Value>>,
        deadline: Option<Duration>,
    ) -> Result<VerificationReport, PipelineError> {
        let request = request_fingerprint(claim, sources).map_err(|e| {
            PipelineError::new(
                VerificationPhase::Queued,
                StageError::Fingerprint(e.to_string()),
            )
        })?;

        async move {
            match self.flights.admit(request) {
                Admission::Leader(guard) => {
                    let outcome = self.run(request, claim, sources, context, deadline).await;
                    guard.complete(outcome.clone());
                    outcome
                }
                Admission::Follower(mut rx) => match self.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        tracing::warn!("identical request already in flight, rejecting");
                        Err(PipelineError::new(
                            VerificationPhase::Queued,
                            StageError::DuplicateInFlight(request),
                        ))
                    }
                    DuplicatePolicy::Join => {
                        tracing::info!("joining identical in-flight request");
                        rx.recv().await.unwrap_or_else(|_| {
                            Err(PipelineError::new(
                                VerificationPhase::Queued,
                                StageError::Cancelled(request),
                            ))
                        })
                    }
                },
            }
        }
        .instrument(verify_span(&request.to_hex()))
        .await
    }

    async fn run(
        &self,
        request: Fingerprint,
        claim: &str,
        sources: &[RawSource],
        context: Option<&Map<String, Value>>,
        deadline: Option<Duration>,
    ) -> Outcome {
        let mut run = PipelineRun::new(request);
        self.execute(&mut run, claim, sources, context, deadline)
            .await
            .map_err(|cause| {
                let stage = run.fail();
                tracing::warn!(%stage, error = %cause, "verification failed");
                PipelineError { stage, cause }
            })
    }

    async fn execute(
        &self,
        run: &mut PipelineRun,
        claim: &str,
        sources: &[RawSource],
        context: Option<&Map<String, Value>>,
        deadline: Option<Duration>,
    ) -> Result<VerificationReport, StageError> {
        run.advance(VerificationPhase::Extracting)?;
        let claims = self
            .extractor
            .extract_claims(claim)
            .instrument(stage_span(VerificationPhase::Extracting.as_str()))
            .await?;

        run.advance(VerificationPhase::Normalizing)?;
        let sources = stage_span(VerificationPhase::Normalizing.as_str())
            .in_scope(|| validate_and_normalize(sources));

        run.advance(VerificationPhase::LedgerBuild)?;
        let chain = stage_span(VerificationPhase::LedgerBuild.as_str()).in_scope(|| {
            let mut ledger = TrustLedger::new(self.scorers.clone(), Arc::clone(&self.clock));
            ledger.build(&claims, &sources)?;
            Ok::<_, StageError>(ledger.into_chain())
        })?;

        run.advance(VerificationPhase::ModelVerify)?;
        let verification = self
            .gateway
            .verify(claim, &sources, &chain, context, deadline)
            .instrument(stage_span(VerificationPhase::ModelVerify.as_str()))
            .await?;

        run.advance(VerificationPhase::EvidenceStore)?;
        let evidence_id = self
            .vault
            .store(claim, &sources, &verification, &chain)
            .instrument(stage_span(VerificationPhase::EvidenceStore.as_str()))
            .await?;

        run.advance(VerificationPhase::Done)?;
        let trust_score = chain.trust_score();
        tracing::info!(
            %evidence_id,
            trust_score,
            verdict = %verification.verification_result,
            "verification complete"
        );
        Ok(VerificationReport {
            claim: claim.to_string(),
            verification,
            trust_score,
            trusted: trust_score >= self.trust_threshold,
            evidence_id,
            sources,
            timestamp: self.clock.now(),
        })
    }

    /// Close the evidence vault. Later verifications fail at `EvidenceStore`.
    pub async fn close(&self) -> Result<(), VerifierError> {
        Ok(self.vault.close().await?)
    }
}
