//! Data availability store
//!
//! Session-wide cache of the three data sets, one `FetchSlot` per
//! (kind, endpoint). Issues at most one in-flight fetch per pair and drops
//! completions that no longer match the slot's in-flight request.

use std::collections::HashMap;

use crate::error::{PanelError, PanelResult};
use crate::services::PanelSnapshot;
use crate::types::{
    ActivityLog, CompletionOutcome, DataKind, FetchOutcome, FetchPayload, FetchSlot, FetchStatus,
    FetchTicket, HostMetadata, PolicyResponseDetail,
};

/// One slot plus the bookkeeping needed to detect stale completions
#[derive(Debug)]
struct SlotEntry<T> {
    slot: FetchSlot<T>,
    /// Request currently allowed to write into the slot
    in_flight: Option<u64>,
    /// Request that produced the current `Success`/`Error` state
    settled_by: Option<u64>,
}

impl<T> Default for SlotEntry<T> {
    fn default() -> Self {
        Self {
            slot: FetchSlot::Idle,
            in_flight: None,
            settled_by: None,
        }
    }
}

impl<T> SlotEntry<T> {
    /// Move an idle slot to `Loading`; any other state keeps its data
    fn begin(&mut self, request_id: u64) -> bool {
        if !matches!(self.slot, FetchSlot::Idle) {
            return false;
        }
        self.slot = FetchSlot::Loading;
        self.in_flight = Some(request_id);
        true
    }

    fn commit(&mut self, request_id: u64, result: PanelResult<T>) -> CompletionOutcome {
        if self.in_flight != Some(request_id) {
            return CompletionOutcome::Stale;
        }
        self.in_flight = None;
        self.settled_by = Some(request_id);
        self.slot = result.into();
        CompletionOutcome::Committed
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn reset_error(&mut self) {
        if matches!(self.slot, FetchSlot::Error(_)) {
            self.reset();
        }
    }
}

#[derive(Debug, Default)]
struct EndpointSlots {
    host_metadata: SlotEntry<HostMetadata>,
    activity_log: SlotEntry<ActivityLog>,
    policy_response: SlotEntry<PolicyResponseDetail>,
    /// Logical time of the last selection, for eviction
    last_selected: u64,
}

impl EndpointSlots {
    fn status(&self, kind: DataKind) -> FetchStatus {
        match kind {
            DataKind::HostMetadata => self.host_metadata.slot.status(),
            DataKind::ActivityLog => self.activity_log.slot.status(),
            DataKind::PolicyResponse => self.policy_response.slot.status(),
        }
    }

    fn settled_by(&self, kind: DataKind) -> Option<u64> {
        match kind {
            DataKind::HostMetadata => self.host_metadata.settled_by,
            DataKind::ActivityLog => self.activity_log.settled_by,
            DataKind::PolicyResponse => self.policy_response.settled_by,
        }
    }

    fn begin(&mut self, kind: DataKind, request_id: u64) -> bool {
        match kind {
            DataKind::HostMetadata => self.host_metadata.begin(request_id),
            DataKind::ActivityLog => self.activity_log.begin(request_id),
            DataKind::PolicyResponse => self.policy_response.begin(request_id),
        }
    }

    fn commit(
        &mut self,
        kind: DataKind,
        request_id: u64,
        result: PanelResult<FetchPayload>,
    ) -> CompletionOutcome {
        match kind {
            DataKind::HostMetadata => self.host_metadata.commit(
                request_id,
                result.and_then(|payload| match payload {
                    FetchPayload::HostMetadata(v) => Ok(v),
                    other => Err(payload_mismatch(kind, &other)),
                }),
            ),
            DataKind::ActivityLog => self.activity_log.commit(
                request_id,
                result.and_then(|payload| match payload {
                    FetchPayload::ActivityLog(v) => Ok(v),
                    other => Err(payload_mismatch(kind, &other)),
                }),
            ),
            DataKind::PolicyResponse => self.policy_response.commit(
                request_id,
                result.and_then(|payload| match payload {
                    FetchPayload::PolicyResponse(v) => Ok(v),
                    other => Err(payload_mismatch(kind, &other)),
                }),
            ),
        }
    }

    fn reset_errors(&mut self) {
        self.host_metadata.reset_error();
        self.activity_log.reset_error();
        self.policy_response.reset_error();
    }

    fn reset(&mut self) {
        self.host_metadata.reset();
        self.activity_log.reset();
        self.policy_response.reset();
    }
}

fn payload_mismatch(expected: DataKind, got: &FetchPayload) -> PanelError {
    log::error!("Fetch for {expected} completed with a {} payload", got.kind());
    PanelError::Unknown(format!("expected {expected} payload, got {}", got.kind()))
}

/// Data availability store
#[derive(Debug)]
pub struct DataAvailabilityStore {
    endpoints: HashMap<String, EndpointSlots>,
    current: Option<String>,
    next_request_id: u64,
    clock: u64,
    max_cached_endpoints: usize,
}

impl DataAvailabilityStore {
    /// Create a store keeping at most `max_cached_endpoints` endpoints (minimum 1)
    #[must_use]
    pub fn new(max_cached_endpoints: usize) -> Self {
        Self {
            endpoints: HashMap::new(),
            current: None,
            next_request_id: 0,
            clock: 0,
            max_cached_endpoints: max_cached_endpoints.max(1),
        }
    }

    /// Endpoint whose slots may be rendered
    pub fn current_endpoint(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Number of endpoints with cached slots
    pub fn cached_endpoints(&self) -> usize {
        self.endpoints.len()
    }

    /// Status of one slot; unknown pairs are `Idle`
    pub fn status(&self, kind: DataKind, endpoint_id: &str) -> FetchStatus {
        self.endpoints
            .get(endpoint_id)
            .map_or(FetchStatus::Idle, |slots| slots.status(kind))
    }

    /// Request id that produced the slot's current success or error
    pub fn settled_request(&self, kind: DataKind, endpoint_id: &str) -> Option<u64> {
        self.endpoints
            .get(endpoint_id)
            .and_then(|slots| slots.settled_by(kind))
    }

    pub fn host_metadata(&self, endpoint_id: &str) -> FetchSlot<&HostMetadata> {
        self.endpoints
            .get(endpoint_id)
            .map_or(FetchSlot::Idle, |slots| slots.host_metadata.slot.as_ref())
    }

    pub fn activity_log(&self, endpoint_id: &str) -> FetchSlot<&ActivityLog> {
        self.endpoints
            .get(endpoint_id)
            .map_or(FetchSlot::Idle, |slots| slots.activity_log.slot.as_ref())
    }

    pub fn policy_response(&self, endpoint_id: &str) -> FetchSlot<&PolicyResponseDetail> {
        self.endpoints
            .get(endpoint_id)
            .map_or(FetchSlot::Idle, |slots| slots.policy_response.slot.as_ref())
    }

    /// Read-only projection of the three slots of one endpoint
    pub fn snapshot(&self, endpoint_id: &str) -> PanelSnapshot<'_> {
        PanelSnapshot {
            host_metadata: self.host_metadata(endpoint_id),
            activity_log: self.activity_log(endpoint_id),
            policy_response: self.policy_response(endpoint_id),
        }
    }

    /// Ask for a fetch of (kind, endpoint).
    ///
    /// Returns a ticket only when the slot is idle; the caller must then run
    /// exactly one fetch and hand the result to [`complete`](Self::complete).
    /// Loading slots coalesce, settled slots are served from cache.
    pub fn request_fetch(&mut self, kind: DataKind, endpoint_id: &str) -> Option<FetchTicket> {
        let request_id = self.next_request_id + 1;
        let slots = self.endpoints.entry(endpoint_id.to_string()).or_default();
        if !slots.begin(kind, request_id) {
            log::debug!(
                "Skip {kind} fetch for {endpoint_id}: slot is {:?}",
                slots.status(kind)
            );
            return None;
        }
        self.next_request_id = request_id;
        log::debug!("Issue {kind} fetch #{request_id} for {endpoint_id}");
        Some(FetchTicket {
            kind,
            endpoint_id: endpoint_id.to_string(),
            request_id,
        })
    }

    /// Commit a finished fetch, unless it was superseded or its endpoint evicted
    pub fn complete(&mut self, outcome: FetchOutcome) -> CompletionOutcome {
        let FetchOutcome { ticket, result } = outcome;
        let Some(slots) = self.endpoints.get_mut(&ticket.endpoint_id) else {
            log::debug!(
                "Drop {} fetch #{} for evicted endpoint {}",
                ticket.kind,
                ticket.request_id,
                ticket.endpoint_id
            );
            return CompletionOutcome::Stale;
        };

        let outcome = slots.commit(ticket.kind, ticket.request_id, result);
        if outcome == CompletionOutcome::Stale {
            log::debug!(
                "Drop stale {} fetch #{} for {}",
                ticket.kind,
                ticket.request_id,
                ticket.endpoint_id
            );
        }
        outcome
    }

    /// Make `endpoint_id` the rendered endpoint.
    ///
    /// Slots of other endpoints stay cached. Switching to an endpoint resets
    /// its errored slots so the re-selection retries them.
    pub fn select_endpoint(&mut self, endpoint_id: &str) {
        self.clock += 1;
        let changed = self.current.as_deref() != Some(endpoint_id);
        let slots = self.endpoints.entry(endpoint_id.to_string()).or_default();
        slots.last_selected = self.clock;
        if changed {
            slots.reset_errors();
            self.current = Some(endpoint_id.to_string());
        }
        self.evict();
    }

    /// Nothing is rendered any more; cached slots are kept
    pub fn clear_selection(&mut self) {
        self.current = None;
    }

    /// Reset every slot of one endpoint; in-flight fetches for it become stale
    pub fn invalidate(&mut self, endpoint_id: &str) {
        if let Some(slots) = self.endpoints.get_mut(endpoint_id) {
            slots.reset();
        }
    }

    fn evict(&mut self) {
        while self.endpoints.len() > self.max_cached_endpoints {
            let victim = self
                .endpoints
                .iter()
                .filter(|(id, _)| self.current.as_deref() != Some(id.as_str()))
                .min_by_key(|(_, slots)| slots.last_selected)
                .map(|(id, _)| id.clone());
            let Some(victim) = victim else {
                break;
            };
            log::debug!("Evict cached slots of {victim}");
            self.endpoints.remove(&victim);
        }
    }
}

impl Default for DataAvailabilityStore {
    fn default() -> Self {
        Self::new(crate::config::PanelConfig::default().max_cached_endpoints)
    }
}
