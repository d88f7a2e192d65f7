//! Per-entity-type collections kept consistent with the server.
//!
//! A store's collection always reflects the most recent successful server
//! response for its type. It is never advanced from client-submitted data:
//! every mutation re-parses the server's confirmed response before touching
//! the collection, and a failed call leaves the collection untouched.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use bizniz_core::{Company, CompanyDraft, Employee, EmployeeDraft};

use crate::envelope::{normalize_collection, normalize_entity};
use crate::error::ClientError;
use crate::resolver::EndpointResolver;
use crate::transport::ApiTransport;

/// An entity type the store can synchronize: its wire routes plus the draft
/// type submitted on create and update.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Fields submitted when creating or updating this entity.
    type Draft: Serialize;

    /// Singular resource name, for diagnostics and `NotFound` errors.
    const RESOURCE: &'static str;
    /// Path listing the full collection.
    const LIST_PATH: &'static str;
    /// Candidate paths for creation, tried in declared order. The lists are
    /// configuration: the backend's true create path has varied across
    /// versions, and these are the paths known to have accepted it.
    const CREATE_PATHS: &'static [&'static str];
    /// Operation key under which the winning create path is memoized.
    const CREATE_OPERATION: &'static str;

    /// The server-assigned identifier.
    fn id(&self) -> &str;

    /// Path addressing one entity.
    #[must_use]
    fn item_path(id: &str) -> String;
}

impl Entity for Company {
    type Draft = CompanyDraft;

    const RESOURCE: &'static str = "company";
    const LIST_PATH: &'static str = "/api/companies";
    const CREATE_PATHS: &'static [&'static str] = &["/api/companies", "/api/company"];
    const CREATE_OPERATION: &'static str = "create.company";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn item_path(id: &str) -> String {
        format!("/api/companies/{id}")
    }
}

impl Entity for Employee {
    type Draft = EmployeeDraft;

    const RESOURCE: &'static str = "employee";
    const LIST_PATH: &'static str = "/api/employees";
    const CREATE_PATHS: &'static [&'static str] = &[
        "/api/employees",
        "/api/employee",
        "/api/staff",
        "/api/personnel",
        "/api/users",
    ];
    const CREATE_OPERATION: &'static str = "create.employee";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn item_path(id: &str) -> String {
        format!("/api/employees/{id}")
    }
}

/// In-memory collection of one entity type, synchronized with the server.
#[derive(Debug)]
pub struct EntityStore<E: Entity> {
    transport: ApiTransport,
    resolver: EndpointResolver,
    items: Vec<E>,
}

impl<E: Entity> EntityStore<E> {
    /// Create an empty store over a transport and resolver.
    #[must_use]
    pub const fn new(transport: ApiTransport, resolver: EndpointResolver) -> Self {
        Self {
            transport,
            resolver,
            items: Vec::new(),
        }
    }

    /// The current collection, in server order.
    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Look up one entity by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&E> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Fetch the collection and replace the local one wholesale.
    ///
    /// An unrecognized payload shape is not an error: it is logged and the
    /// collection becomes empty, so the rest of the page can still render.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and record parse failures; in both
    /// cases the local collection is left untouched.
    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn load(&mut self) -> Result<&[E], ClientError> {
        let payload = self.transport.get(E::LIST_PATH).await?;

        let normalized = normalize_collection(payload);
        match normalized.shape {
            Some(shape) => {
                debug!(resource = E::RESOURCE, shape = shape.name(), count = normalized.records.len(), "collection loaded");
            }
            None => {
                warn!(resource = E::RESOURCE, "unrecognized collection payload shape, rendering empty");
            }
        }

        let items = normalized
            .records
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<E>, _>>()?;

        self.items = items;
        Ok(&self.items)
    }

    /// Create an entity from a draft and append the server-confirmed result.
    ///
    /// Creation is the operation whose path is uncertain, so it goes through
    /// the endpoint resolver over the entity's candidate list; a previously
    /// memoized winner is tried first. The entity appended to the collection
    /// is parsed from the server's response, never taken from the draft.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EndpointExhausted`] when every candidate path
    /// fails, or [`ClientError::Parse`] when the response carries no
    /// recognizable entity.
    #[instrument(skip(self, draft), fields(resource = E::RESOURCE))]
    pub async fn create(&mut self, draft: &E::Draft) -> Result<E, ClientError> {
        let body = serde_json::to_value(draft)?;
        let resolution = self
            .resolver
            .resolve(
                &self.transport,
                E::CREATE_OPERATION,
                E::CREATE_PATHS,
                reqwest::Method::POST,
                Some(&body),
            )
            .await?;

        debug!(resource = E::RESOURCE, path = %resolution.path_used, "entity created");

        let entity = parse_confirmed::<E>(resolution.payload)?;
        self.items.push(entity.clone());
        Ok(entity)
    }

    /// Update the entity with `id` from a draft.
    ///
    /// Requires `id` to exist in the local collection - calling on an absent
    /// id is a programming error. On success exactly the matching entry is
    /// replaced with the server-confirmed entity; every other entry is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the precondition fails;
    /// otherwise propagates transport and parse failures.
    #[instrument(skip(self, draft), fields(resource = E::RESOURCE))]
    pub async fn update(&mut self, id: &str, draft: &E::Draft) -> Result<E, ClientError> {
        let index = self.position(id)?;

        let body = serde_json::to_value(draft)?;
        let payload = self.transport.put(&E::item_path(id), &body).await?;
        let entity = parse_confirmed::<E>(payload)?;

        if let Some(slot) = self.items.get_mut(index) {
            *slot = entity.clone();
        }
        Ok(entity)
    }

    /// Remove the entity with `id`.
    ///
    /// Requires `id` to exist in the local collection. On success exactly the
    /// matching entry is removed, preserving the relative order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the precondition fails;
    /// otherwise propagates transport failures.
    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn remove(&mut self, id: &str) -> Result<(), ClientError> {
        let index = self.position(id)?;

        self.transport.delete(&E::item_path(id)).await?;

        self.items.remove(index);
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, ClientError> {
        self.items
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| ClientError::NotFound {
                resource: E::RESOURCE,
                id: id.to_string(),
            })
    }
}

/// Parse the server-confirmed entity out of a mutation response.
///
/// The response is unwrapped with the single-entity normalizer first; when no
/// wrapper matches, the raw payload itself is parsed so that the resulting
/// error names the fields actually missing.
fn parse_confirmed<E: Entity>(payload: Value) -> Result<E, ClientError> {
    let entity_value = normalize_entity(payload.clone()).unwrap_or(payload);
    Ok(serde_json::from_value(entity_value)?)
}
