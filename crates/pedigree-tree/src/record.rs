#![forbid(unsafe_code)]

//! Person records as the document store keeps them.
//!
//! Slot numbers are a presentation concept and are not persisted. A stored
//! [`Individual`] only knows its parents and children by id, so moving between
//! a chart and the store means walking those id arrays:
//!
//! - [`PedigreeTree::to_records`] exports every node with ids derived from the
//!   tree id and the slot, and parent/child arrays derived from the edges.
//! - [`PedigreeTree::from_records`] rebuilds a chart from a proband by
//!   following `parents` breadth first, first parent to `2p`, second to
//!   `2p + 1`.
//!
//! JSON field names follow the store (`camelCase`, `_id` accepted for `id`).

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use pedigree_core::Slot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ChartConfig;
use crate::error::TreeError;
use crate::tree::PedigreeTree;

/// Identifier of a stored individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Deterministic id for a chart slot: `<tree_id>-<slot>`.
    #[must_use]
    pub fn for_slot(tree_id: &str, slot: Slot) -> Self {
        Self(format!("{tree_id}-{slot}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Gender as stored; the wire values are the store's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Homme")]
    Male,
    #[serde(rename = "Femme")]
    Female,
    #[default]
    #[serde(rename = "Autre")]
    Other,
}

/// A dated, placed event (birth or death).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifeEvent {
    #[serde(default, with = "date_format", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

impl LifeEvent {
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date.map(|date| date.year())
    }
}

/// One marriage of an individual.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marriage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<RecordId>,
    #[serde(default, with = "date_format", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// A stored person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub tree_id: String,
    #[serde(default)]
    pub owner_id: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<LifeEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<LifeEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marriages: Vec<Marriage>,
    #[serde(default)]
    pub parents: Vec<RecordId>,
    #[serde(default)]
    pub children: Vec<RecordId>,
}

impl Individual {
    /// Minimal record with a name split from a chart label.
    #[must_use]
    pub fn from_label(id: RecordId, tree_id: &str, owner_id: &str, label: &str) -> Self {
        let label = label.trim();
        let (first, last) = match label.split_once(char::is_whitespace) {
            Some((first, rest)) => (first, Some(rest.trim().to_owned())),
            None => (label, None),
        };
        Self {
            id,
            tree_id: tree_id.to_owned(),
            owner_id: owner_id.to_owned(),
            first_name: first.to_owned(),
            last_name: last.filter(|rest| !rest.is_empty()),
            gender: None,
            birth: None,
            death: None,
            marriages: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Check the store's rules: a first name, at most two distinct parents.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.first_name.trim().is_empty() {
            return Err(RecordError::MissingFirstName {
                id: self.id.clone(),
            });
        }
        if self.parents.len() > 2 {
            return Err(RecordError::TooManyParents {
                id: self.id.clone(),
                count: self.parents.len(),
            });
        }
        if let [first, second] = self.parents.as_slice()
            && first == second
        {
            return Err(RecordError::DuplicateParent {
                id: self.id.clone(),
                parent: first.clone(),
            });
        }
        Ok(())
    }

    /// `"first last"`, trimmed.
    #[must_use]
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{first} {last}"),
            _ => first.to_owned(),
        }
    }

    /// `"<birth year> - <death year>"`, `...` where unknown.
    #[must_use]
    pub fn lifespan(&self) -> String {
        let year = |event: &Option<LifeEvent>| {
            event
                .as_ref()
                .and_then(LifeEvent::year)
                .map_or_else(|| "...".to_owned(), |y| y.to_string())
        };
        format!("{} - {}", year(&self.birth), year(&self.death))
    }
}

/// Problems with stored records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record {id} has no first name")]
    MissingFirstName { id: RecordId },

    #[error("record {id} lists {count} parents, at most two are supported")]
    TooManyParents { id: RecordId, count: usize },

    #[error("record {id} lists parent {parent} twice")]
    DuplicateParent { id: RecordId, parent: RecordId },

    #[error("record id {id} appears more than once")]
    DuplicateId { id: RecordId },

    #[error("root record {id} not found")]
    UnknownRoot { id: RecordId },

    #[error("record {child} names unknown parent {parent}")]
    UnknownParent { child: RecordId, parent: RecordId },

    #[error("record {id} is listed as its own ancestor")]
    AncestryCycle { id: RecordId },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Summary of [`PedigreeTree::from_records`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    /// Which record sits on which slot.
    pub slots: BTreeMap<Slot, RecordId>,
    /// Slots created for a missing second parent.
    pub placeholders: usize,
    /// Parent references dropped at the depth ceiling.
    pub truncated: usize,
}

impl ImportReport {
    /// Record placed on a slot, if any.
    #[must_use]
    pub fn record_for(&self, slot: Slot) -> Option<&RecordId> {
        self.slots.get(&slot)
    }
}

impl PedigreeTree {
    /// Export every node as a stored individual.
    #[must_use]
    pub fn to_records(&self, tree_id: &str, owner_id: &str) -> Vec<Individual> {
        self.nodes()
            .map(|node| {
                let slot = node.slot();
                let mut record = Individual::from_label(
                    RecordId::for_slot(tree_id, slot),
                    tree_id,
                    owner_id,
                    node.label(),
                );
                if node.is_expanded() {
                    let (first, second) = slot.parents();
                    record.parents = vec![
                        RecordId::for_slot(tree_id, first),
                        RecordId::for_slot(tree_id, second),
                    ];
                }
                if let Some(child) = slot.child() {
                    record.children = vec![RecordId::for_slot(tree_id, child)];
                }
                record
            })
            .collect()
    }

    /// Rebuild a chart from stored individuals, starting at `root`.
    ///
    /// Records not reachable from `root` through `parents` are ignored.
    pub fn from_records(
        records: &[Individual],
        root: &RecordId,
        config: ChartConfig,
    ) -> Result<(PedigreeTree, ImportReport), RecordError> {
        let mut by_id: HashMap<&RecordId, &Individual> = HashMap::with_capacity(records.len());
        for record in records {
            if by_id.insert(&record.id, record).is_some() {
                return Err(RecordError::DuplicateId {
                    id: record.id.clone(),
                });
            }
        }

        let root_record = by_id
            .get(root)
            .copied()
            .ok_or_else(|| RecordError::UnknownRoot { id: root.clone() })?;
        root_record.validate()?;

        let mut tree = PedigreeTree::with_config(config);
        let mut report = ImportReport::default();
        tree.set_label(Slot::ROOT, root_record.display_name())?;
        report.slots.insert(Slot::ROOT, root.clone());

        let mut queue = VecDeque::from([(Slot::ROOT, root_record)]);
        while let Some((slot, record)) = queue.pop_front() {
            if record.parents.is_empty() {
                continue;
            }

            let mut parents = Vec::with_capacity(record.parents.len());
            for parent_id in &record.parents {
                let parent = by_id.get(parent_id).copied().ok_or_else(|| {
                    RecordError::UnknownParent {
                        child: record.id.clone(),
                        parent: parent_id.clone(),
                    }
                })?;
                parent.validate()?;
                let on_own_line = slot
                    .lineage()
                    .any(|below| report.slots.get(&below) == Some(parent_id));
                if on_own_line {
                    return Err(RecordError::AncestryCycle {
                        id: parent_id.clone(),
                    });
                }
                parents.push(parent);
            }

            let expansion = match tree.insert_parents(slot) {
                Ok(expansion) => expansion,
                Err(TreeError::DepthExceeded { .. }) => {
                    report.truncated += parents.len();
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let (first, second) = expansion.parents;
            for (target, parent) in [first, second].into_iter().zip(parents) {
                tree.set_label(target, parent.display_name())?;
                report.slots.insert(target, parent.id.clone());
                queue.push_back((target, parent));
            }
            if record.parents.len() == 1 {
                report.placeholders += 1;
            }
        }

        tree.relayout();

        pedigree_core::info!(
            root = %root,
            placed = report.slots.len(),
            placeholders = report.placeholders,
            truncated = report.truncated,
            "records imported"
        );

        Ok((tree, report))
    }
}

/// Dates as `YYYY-MM-DD`; full RFC 3339 timestamps from the store are accepted
/// and reduced to their date.
mod date_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(text) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, FORMAT) {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(text)
            .map(|stamp| Some(stamp.date_naive()))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_GENERATIONS_LIMIT;

    fn slot(raw: u64) -> Slot {
        Slot::new(raw).expect("valid slot")
    }

    fn person(id: &str, first: &str, parents: &[&str]) -> Individual {
        let mut record = Individual::from_label(RecordId::new(id), "t", "owner", first);
        record.parents = parents.iter().map(|p| RecordId::new(*p)).collect();
        record
    }

    #[test]
    fn parses_store_document() {
        let json = r#"{
            "_id": "667c",
            "treeId": "t1",
            "ownerId": "user_placeholder_id",
            "firstName": "Jeanne",
            "lastName": "Martin",
            "gender": "Femme",
            "birth": { "date": "1901-03-04T00:00:00.000Z", "place": "Lyon" },
            "death": { "date": null, "place": "" },
            "marriages": [{ "spouseId": "667d", "date": "1925-06-01" }],
            "parents": [],
            "children": ["667e"]
        }"#;
        let record: Individual = serde_json::from_str(json).expect("parse");
        assert_eq!(record.id.as_str(), "667c");
        assert_eq!(record.gender, Some(Gender::Female));
        assert_eq!(record.birth.as_ref().and_then(LifeEvent::year), Some(1901));
        assert_eq!(record.death.as_ref().and_then(|d| d.date), None);
        assert_eq!(record.marriages[0].spouse_id, Some(RecordId::new("667d")));
        assert_eq!(record.display_name(), "Jeanne Martin");
        assert_eq!(record.lifespan(), "1901 - ...");
        assert!(record.validate().is_ok());
    }

    #[test]
    fn serializes_with_store_field_names() {
        let mut record = person("a", "Ada Lovelace", &[]);
        record.birth = Some(LifeEvent {
            date: NaiveDate::from_ymd_opt(1815, 12, 10),
            place: None,
        });
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["treeId"], "t");
        assert_eq!(json["birth"]["date"], "1815-12-10");
        assert!(json.get("gender").is_none());
    }

    #[test]
    fn validate_rejects_blank_name_and_extra_parents() {
        let mut record = person("a", "Ada", &[]);
        record.first_name = "  ".to_owned();
        assert!(matches!(
            record.validate(),
            Err(RecordError::MissingFirstName { .. })
        ));
        let record = person("b", "Bob", &["x", "y", "z"]);
        assert_eq!(
            record.validate(),
            Err(RecordError::TooManyParents {
                id: RecordId::new("b"),
                count: 3,
            })
        );
    }

    #[test]
    fn validate_rejects_repeated_parent() {
        let record = person("kid", "Kid", &["p", "p"]);
        assert_eq!(
            record.validate(),
            Err(RecordError::DuplicateParent {
                id: RecordId::new("kid"),
                parent: RecordId::new("p"),
            })
        );
        assert!(person("kid", "Kid", &["p", "q"]).validate().is_ok());
    }

    #[test]
    fn import_refuses_one_person_on_both_parent_slots() {
        let records = vec![person("kid", "Kid", &["p", "p"]), person("p", "Pat", &[])];
        let root = RecordId::new("kid");
        let err = PedigreeTree::from_records(&records, &root, ChartConfig::default())
            .expect_err("same parent twice");
        assert!(matches!(err, RecordError::DuplicateParent { .. }));
    }

    #[test]
    fn export_derives_links_from_edges() {
        let mut tree = PedigreeTree::new();
        tree.expand(Slot::ROOT).expect("expand");
        tree.set_label(slot(2), "Jean de La Fontaine").expect("label");
        let records = tree.to_records("t9", "owner");
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id.as_str(), "t9-1");
        assert_eq!(
            records[0].parents,
            vec![RecordId::new("t9-2"), RecordId::new("t9-3")]
        );
        assert!(records[0].children.is_empty());
        assert_eq!(records[1].first_name, "Jean");
        assert_eq!(records[1].last_name.as_deref(), Some("de La Fontaine"));
        assert_eq!(records[1].children, vec![RecordId::new("t9-1")]);
        assert!(records[2].parents.is_empty());
    }

    #[test]
    fn import_places_parents_in_order() {
        let records = vec![
            person("kid", "Kid", &["dad", "mum"]),
            person("dad", "Dad", &["gp"]),
            person("mum", "Mum", &[]),
            person("gp", "Grandpa", &[]),
            person("stranger", "Nobody", &[]),
        ];
        let (tree, report) =
            PedigreeTree::from_records(&records, &RecordId::new("kid"), ChartConfig::default())
                .expect("import");
        let labels: Vec<(u64, &str)> = tree.nodes().map(|n| (n.slot().get(), n.label())).collect();
        assert_eq!(
            labels,
            vec![
                (1, "Kid"),
                (2, "Dad"),
                (3, "Mum"),
                (4, "Grandpa"),
                (5, "Parent 5"),
            ]
        );
        assert_eq!(report.placeholders, 1);
        assert_eq!(report.truncated, 0);
        assert_eq!(report.record_for(slot(4)), Some(&RecordId::new("gp")));
        assert_eq!(report.record_for(slot(5)), None);
    }

    #[test]
    fn import_truncates_at_depth_ceiling() {
        let records = vec![
            person("kid", "Kid", &["dad", "mum"]),
            person("dad", "Dad", &["gp", "gm"]),
            person("mum", "Mum", &[]),
            person("gp", "Grandpa", &[]),
            person("gm", "Grandma", &[]),
        ];
        let config = ChartConfig::default().with_max_generations(2);
        let (tree, report) =
            PedigreeTree::from_records(&records, &RecordId::new("kid"), config).expect("import");
        assert_eq!(tree.node_count(), 3);
        assert_eq!(report.truncated, 2);
    }

    #[test]
    fn import_fills_deepest_allowed_chart() {
        // Two people per generation, each listing both people of the next one,
        // so every slot up to the ceiling gets filled.
        let generations = MAX_GENERATIONS_LIMIT;
        let mut records = Vec::new();
        for level in 0..=generations {
            let parents = [format!("p{}", level + 1), format!("q{}", level + 1)];
            let parents: Vec<&str> = if level < generations {
                parents.iter().map(String::as_str).collect()
            } else {
                Vec::new()
            };
            records.push(person(&format!("p{level}"), "P", &parents));
            records.push(person(&format!("q{level}"), "Q", &parents));
        }
        let config = ChartConfig::default().with_max_generations(generations);

        let (tree, report) =
            PedigreeTree::from_records(&records, &RecordId::new("p0"), config).expect("import");

        let full = (1usize << generations) - 1;
        assert_eq!(tree.node_count(), full);
        assert_eq!(tree.layout().len(), full);
        assert_eq!(tree.max_level(), generations - 1);
        assert_eq!(report.truncated, 1 << generations);
        assert_eq!(tree.layout(), &tree.config().layout().compute(tree.slots()));
    }

    #[test]
    fn import_detects_cycles() {
        let records = vec![
            person("kid", "Kid", &["dad"]),
            person("dad", "Dad", &["kid"]),
        ];
        let root = RecordId::new("kid");
        let err = PedigreeTree::from_records(&records, &root, ChartConfig::default())
            .expect_err("cycle");
        assert_eq!(
            err,
            RecordError::AncestryCycle {
                id: RecordId::new("kid")
            }
        );
    }

    #[test]
    fn import_allows_pedigree_collapse() {
        // Same grandparent reached through both parents is not a cycle.
        let records = vec![
            person("kid", "Kid", &["dad", "mum"]),
            person("dad", "Dad", &["gp"]),
            person("mum", "Mum", &["gp"]),
            person("gp", "Grandpa", &[]),
        ];
        let (tree, report) =
            PedigreeTree::from_records(&records, &RecordId::new("kid"), ChartConfig::default())
                .expect("import");
        assert_eq!(tree.node(slot(4)).map(|n| n.label()), Some("Grandpa"));
        assert_eq!(tree.node(slot(6)).map(|n| n.label()), Some("Grandpa"));
        assert_eq!(report.placeholders, 2);
    }

    #[test]
    fn import_errors() {
        let records = vec![person("kid", "Kid", &["ghost"]), person("kid2", "Kid", &[])];
        assert_eq!(
            PedigreeTree::from_records(&records, &RecordId::new("nope"), ChartConfig::default())
                .map(|_| ()),
            Err(RecordError::UnknownRoot {
                id: RecordId::new("nope")
            })
        );
        assert_eq!(
            PedigreeTree::from_records(&records, &RecordId::new("kid"), ChartConfig::default())
                .map(|_| ()),
            Err(RecordError::UnknownParent {
                child: RecordId::new("kid"),
                parent: RecordId::new("ghost"),
            })
        );
        let dupes = vec![person("a", "A", &[]), person("a", "B", &[])];
        assert_eq!(
            PedigreeTree::from_records(&dupes, &RecordId::new("a"), ChartConfig::default())
                .map(|_| ()),
            Err(RecordError::DuplicateId {
                id: RecordId::new("a")
            })
        );
    }

    #[test]
    fn export_then_import_preserves_shape() {
        let mut tree = PedigreeTree::new();
        tree.expand(Slot::ROOT).expect("expand 1");
        tree.expand(slot(3)).expect("expand 3");
        tree.set_label(slot(6), "Louise").expect("label");
        let records = tree.to_records("t", "o");
        let (back, report) =
            PedigreeTree::from_records(&records, &RecordId::new("t-1"), ChartConfig::default())
                .expect("import");
        let slots = |t: &PedigreeTree| t.slots().map(Slot::get).collect::<Vec<_>>();
        assert_eq!(slots(&back), slots(&tree));
        assert_eq!(back.node(slot(6)).map(|n| n.label()), Some("Louise"));
        assert_eq!(report.placeholders, 0);
    }
}
