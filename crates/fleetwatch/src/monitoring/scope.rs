use serde::{Deserialize, Serialize};

/// Closed set of roles recognized by the access model.
///
/// Role descriptors arrive as free-form strings from the upstream auth
/// layer; [`ActorRole::from_descriptor`] performs the legacy substring
/// mapping exactly once at the edge so the resolver itself dispatches on a
/// closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    SuperAdmin,
    RegionalAdmin,
    Inspector,
    Viewer,
    Unrecognized,
}

impl ActorRole {
    /// Map a legacy role descriptor onto the closed set.
    pub fn from_descriptor(descriptor: &str) -> Self {
        let normalized = descriptor.to_ascii_lowercase();
        if normalized.contains("super admin") {
            Self::SuperAdmin
        } else if normalized.contains("regional admin") {
            Self::RegionalAdmin
        } else if normalized.contains("inspector") {
            Self::Inspector
        } else if normalized.contains("viewer") {
            Self::Viewer
        } else {
            Self::Unrecognized
        }
    }
}

/// Already-authenticated caller descriptor consumed by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: ActorRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
    /// Explicit scope carried by viewer records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ScopeContext>,
}

/// Resolved access boundary for a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScopeContext {
    /// Unrestricted visibility over every center.
    National,
    /// Centers whose jurisdiction-path region matches exactly.
    Regional { region: String },
    /// A single center, keyed by identifier or display name. Legacy
    /// records key by name, so both are accepted.
    Center { value: String },
}

/// Map an actor to its access boundary.
///
/// Unrecognized roles keep the legacy unrestricted fallback; the same
/// applies when a role-specific assignment (region, center) is missing
/// from the actor record. Tightening this to deny-by-default is a product
/// decision tracked in DESIGN.md.
pub fn resolve_scope(actor: &Actor) -> ScopeContext {
    match actor.role {
        ActorRole::SuperAdmin => ScopeContext::National,
        ActorRole::RegionalAdmin => match &actor.region {
            Some(region) => ScopeContext::Regional {
                region: region.clone(),
            },
            None => ScopeContext::National,
        },
        ActorRole::Inspector => match &actor.center {
            Some(center) => ScopeContext::Center {
                value: center.clone(),
            },
            None => ScopeContext::National,
        },
        ActorRole::Viewer => actor.scope.clone().unwrap_or(ScopeContext::National),
        ActorRole::Unrecognized => ScopeContext::National,
    }
}

/// Fields a scoped entity exposes for filtering.
#[derive(Debug, Clone, Copy)]
pub struct ScopeKey<'a> {
    pub region: &'a str,
    pub id: &'a str,
    pub name: &'a str,
}

/// Narrow a batch of entities to the caller's scope.
///
/// Pure and order-preserving: the result keeps the input's relative order
/// and the same `(entities, scope)` pair always yields the same subset.
/// National passes everything through; Center retains at most one entity.
pub fn filter_by_scope<T, S>(entities: Vec<T>, scope: &ScopeContext, selector: S) -> Vec<T>
where
    S: for<'a> Fn(&'a T) -> ScopeKey<'a>,
{
    match scope {
        ScopeContext::National => entities,
        ScopeContext::Regional { region } => entities
            .into_iter()
            .filter(|entity| selector(entity).region == region)
            .collect(),
        ScopeContext::Center { value } => {
            let mut matched: Vec<T> = entities
                .into_iter()
                .filter(|entity| {
                    let key = selector(entity);
                    key.id == value || key.name == value
                })
                .collect();
            matched.truncate(1);
            matched
        }
    }
}
