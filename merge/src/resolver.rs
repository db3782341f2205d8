//! Duplicate qualified-association removal.
//!
//! Redundant pipeline runs leave an acquisition with several
//! `prov:qualifiedAssociation` nodes that name the same agent in the same
//! role. This module keeps one association per `(acquisition, agent, role)`
//! and deletes the others outright.
//!
//! # Ordering
//!
//! Links are examined in sorted `(acquisition, association)` order, so the
//! association that survives is always the smallest node for its key, whatever
//! order the store iterates in.
//!
//! # Shared associations
//!
//! Links are judged per `(acquisition, association)` pair, but deleting an
//! association removes all of its outgoing triples for every acquisition. An
//! association that is a duplicate under one acquisition and the survivor
//! under another therefore leaves the second acquisition pointing at an empty
//! node. This is the established behaviour of the merge and is kept as is.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use nidm_graph::vocab::{PROV_AGENT, PROV_HAD_ROLE, PROV_QUALIFIED_ASSOCIATION};
use nidm_graph::{Node, Triple, TripleStore};

/// `(acquisition, agent, role)`.
type AssociationKey = (Node, Node, Node);

/// What a resolution pass did to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// `prov:qualifiedAssociation` links examined.
    pub examined: usize,
    /// Links skipped because the association lacks `prov:agent` or `prov:hadRole`.
    pub skipped: usize,
    /// Links removed from acquisitions.
    pub links_removed: usize,
    /// Association nodes whose outgoing triples were deleted.
    pub nodes_deleted: usize,
    /// Total triples removed from the store.
    pub triples_removed: usize,
}

/// Removes duplicate qualified associations from `store` in place.
///
/// For each acquisition, associations sharing an agent and role beyond the
/// first are unlinked from the acquisition and stripped of every outgoing
/// triple. Associations without both an agent and a role are left alone.
/// Decisions are made over a snapshot of the links taken before any removal.
pub fn remove_duplicate_associations<S: TripleStore + ?Sized>(store: &mut S) -> Resolution {
    let qualified = Node::iri(PROV_QUALIFIED_ASSOCIATION);
    let agent_of = Node::iri(PROV_AGENT);
    let role_of = Node::iri(PROV_HAD_ROLE);

    let mut links = store.subject_objects(&qualified);
    links.sort();

    let mut resolution = Resolution {
        examined: links.len(),
        ..Resolution::default()
    };
    let before = store.len();

    let mut canonical: HashMap<AssociationKey, Node> = HashMap::new();
    let mut unlink: Vec<(Node, Node)> = Vec::new();
    let mut doomed: BTreeSet<Node> = BTreeSet::new();

    for (acquisition, association) in links {
        let (Some(agent), Some(role)) = (
            store.value(&association, &agent_of),
            store.value(&association, &role_of),
        ) else {
            resolution.skipped += 1;
            continue;
        };

        match canonical.entry((acquisition.clone(), agent, role)) {
            Entry::Vacant(slot) => {
                slot.insert(association);
            }
            Entry::Occupied(_) => {
                doomed.insert(association.clone());
                unlink.push((acquisition, association));
            }
        }
    }

    for (acquisition, association) in unlink {
        let link = Triple::new(acquisition, qualified.clone(), association);
        if store.remove(&link) {
            resolution.links_removed += 1;
        }
    }
    for association in &doomed {
        store.remove_matching(Some(association), None, None);
    }

    resolution.nodes_deleted = doomed.len();
    resolution.triples_removed = before - store.len();
    resolution
}
