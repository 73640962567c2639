//! Column resolution: binding logical fields to table columns.
//!
//! Headers are matched against a per-field alias registry first (compared
//! with [`fold_key`], so case, `_`, `-` and repeated whitespace do not
//! matter). Required fields that no alias resolves fall back to content
//! heuristics over the still unclaimed columns. A column is bound to at most
//! one field.

use crosswalk_model::fold_key;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::table::RawTable;

/// Content heuristic used when no header alias matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Highest share of code-like values, which must exceed one half.
    CodeLike,
    /// Longest average text length.
    LongestText,
}

/// One logical field and the headers accepted for it, best first.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
    pub heuristic: Option<Heuristic>,
}

/// Ordered field registry for one kind of source.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Number of required fields named by an alias somewhere in `row`.
    pub fn required_alias_hits(&self, row: &[String]) -> usize {
        let folded: Vec<String> = row.iter().map(|cell| fold_key(cell)).collect();
        self.fields
            .iter()
            .filter(|field| field.required)
            .filter(|field| {
                field
                    .aliases
                    .iter()
                    .any(|alias| folded.contains(&fold_key(alias)))
            })
            .count()
    }
}

pub const ITEM_CODE: &str = "item_code";
pub const ITEM_NAME: &str = "item_name";
pub const CATEGORY: &str = "category";
pub const SUBCATEGORY: &str = "subcategory";
pub const DESCRIPTION: &str = "description";
pub const UNIT_PRICE: &str = "unit_price";

/// NDIS support-item code guide.
pub const NDIS_SCHEMA: Schema = Schema {
    name: "NDIS",
    fields: &[
        FieldSpec {
            name: ITEM_CODE,
            aliases: &[
                "Support_Item_Number",
                "Support Item Number",
                "Item Number",
                "Code",
                "Support Code",
                "NDIS Code",
                "Item Code",
                "Number",
            ],
            required: true,
            heuristic: Some(Heuristic::CodeLike),
        },
        FieldSpec {
            name: ITEM_NAME,
            aliases: &[
                "Support_Item_Name",
                "Support Item Name",
                "Item Name",
                "Support Item",
                "Name",
                "Description",
                "Item Description",
            ],
            required: true,
            heuristic: Some(Heuristic::LongestText),
        },
        FieldSpec {
            name: CATEGORY,
            aliases: &["Category", "AT Category", "Support Category", "Type", "Group"],
            required: false,
            heuristic: None,
        },
        FieldSpec {
            name: DESCRIPTION,
            aliases: &["Description", "Details", "Item Description", "Full Description"],
            required: false,
            heuristic: None,
        },
        FieldSpec {
            name: UNIT_PRICE,
            aliases: &["Unit_Price", "Unit Price", "Price", "Cost", "Amount"],
            required: false,
            heuristic: None,
        },
    ],
};

/// EnableNSW category list.
pub const ENABLENSW_SCHEMA: Schema = Schema {
    name: "EnableNSW",
    fields: &[
        FieldSpec {
            name: CATEGORY,
            aliases: &["Category", "EnableNSW Category", "AT Category"],
            required: true,
            heuristic: None,
        },
        FieldSpec {
            name: SUBCATEGORY,
            aliases: &[
                "Subcategory",
                "Sub Category",
                "Sub-category",
                "EnableNSW Subcategory",
            ],
            required: true,
            heuristic: None,
        },
        FieldSpec {
            name: DESCRIPTION,
            aliases: &["Description", "Details"],
            required: false,
            heuristic: None,
        },
    ],
};

/// How a field found its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    Alias,
    Heuristic,
}

/// A field bound to a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnBinding {
    pub field: &'static str,
    pub column: usize,
    pub header: String,
    pub resolution: Resolution,
}

/// All bindings of a table, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnBindings {
    bindings: Vec<ColumnBinding>,
}

impl ColumnBindings {
    pub fn get(&self, field: &str) -> Option<&ColumnBinding> {
        self.bindings.iter().find(|binding| binding.field == field)
    }

    pub fn column(&self, field: &str) -> Option<usize> {
        self.get(field).map(|binding| binding.column)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Binds the fields of `schema` to columns of `table`.
///
/// Fails when a required field resolves neither by alias nor by heuristic.
pub fn resolve_columns(table: &RawTable, schema: &Schema) -> Result<ColumnBindings> {
    let folded: Vec<String> = table.headers.iter().map(|h| fold_key(h)).collect();
    let mut claimed = vec![false; table.headers.len()];
    let mut resolved: Vec<Option<(usize, Resolution)>> = vec![None; schema.fields.len()];

    let order: Vec<usize> = (0..schema.fields.len())
        .filter(|&idx| schema.fields[idx].required)
        .chain((0..schema.fields.len()).filter(|&idx| !schema.fields[idx].required))
        .collect();

    for &idx in &order {
        let spec = &schema.fields[idx];
        let hit = spec.aliases.iter().find_map(|alias| {
            let alias = fold_key(alias);
            (0..folded.len()).find(|&col| !claimed[col] && folded[col] == alias)
        });
        if let Some(col) = hit {
            claimed[col] = true;
            resolved[idx] = Some((col, Resolution::Alias));
        }
    }

    for &idx in &order {
        let spec = &schema.fields[idx];
        if resolved[idx].is_some() || !spec.required {
            continue;
        }
        let hit = spec
            .heuristic
            .and_then(|heuristic| apply_heuristic(table, &claimed, heuristic));
        match hit {
            Some(col) => {
                claimed[col] = true;
                resolved[idx] = Some((col, Resolution::Heuristic));
            }
            None => {
                return Err(SchemaError::UnresolvedField {
                    schema: schema.name,
                    field: spec.name,
                    columns: table.headers.join(", "),
                });
            }
        }
    }

    let bindings = schema
        .fields
        .iter()
        .zip(resolved)
        .filter_map(|(spec, hit)| {
            hit.map(|(column, resolution)| ColumnBinding {
                field: spec.name,
                column,
                header: table.headers[column].clone(),
                resolution,
            })
        })
        .collect::<Vec<_>>();
    for binding in &bindings {
        debug!(
            schema = schema.name,
            field = binding.field,
            column = %binding.header,
            resolution = ?binding.resolution,
            "resolved column"
        );
    }
    Ok(ColumnBindings { bindings })
}

fn apply_heuristic(table: &RawTable, claimed: &[bool], heuristic: Heuristic) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (col, _) in claimed.iter().enumerate().filter(|(_, taken)| !**taken) {
        let profile = ColumnProfile::analyze(table.column(col));
        if profile.non_empty == 0 {
            continue;
        }
        let score = match heuristic {
            Heuristic::CodeLike => {
                let ratio = profile.code_like_ratio();
                if ratio <= 0.5 {
                    continue;
                }
                ratio
            }
            Heuristic::LongestText => profile.average_length(),
        };
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((col, score));
        }
    }
    best.map(|(col, _)| col)
}

#[derive(Debug, Default, Clone, Copy)]
struct ColumnProfile {
    non_empty: usize,
    code_like: usize,
    total_chars: usize,
}

impl ColumnProfile {
    fn analyze<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let mut profile = Self::default();
        for value in values {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            profile.non_empty += 1;
            profile.total_chars += trimmed.chars().count();
            if is_code_like(trimmed) {
                profile.code_like += 1;
            }
        }
        profile
    }

    fn code_like_ratio(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.code_like as f64 / self.non_empty as f64
        }
    }

    fn average_length(self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.total_chars as f64 / self.non_empty as f64
        }
    }
}

/// Identifier-shaped value such as `05_122203111_0103_1_2` or `AT-0042`.
///
/// Plain decimals (prices) are not code-like.
fn is_code_like(value: &str) -> bool {
    if value.len() < 2
        || !value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/'))
        || !value.chars().any(|ch| ch.is_ascii_digit())
    {
        return false;
    }
    if value.contains('.') && value.parse::<f64>().is_ok() {
        return false;
    }
    let has_separator = value.contains(['_', '-', '/']);
    let has_alpha = value.chars().any(|ch| ch.is_ascii_alphabetic());
    has_separator || has_alpha || value.len() >= 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::HeaderRow;

    fn table(data: &[&[&str]]) -> RawTable {
        let rows = data
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect();
        RawTable::from_rows(None, rows, HeaderRow::First)
    }

    #[test]
    fn item_number_resolves_as_code() {
        let t = table(&[
            &["Item Number", "Item Name", "Category"],
            &["05_1", "Manual wheelchair", "Personal Mobility"],
        ]);
        let bindings = resolve_columns(&t, &NDIS_SCHEMA).expect("resolve");
        let code = bindings.get(ITEM_CODE).expect("code");
        assert_eq!(code.header, "Item Number");
        assert_eq!(code.resolution, Resolution::Alias);
        assert_eq!(bindings.column(ITEM_NAME), Some(1));
        assert_eq!(bindings.column(CATEGORY), Some(2));
        assert_eq!(bindings.column(DESCRIPTION), None);
    }

    #[test]
    fn aliases_ignore_case_and_separators() {
        let t = table(&[
            &["support-item_NUMBER", "SUPPORT ITEM NAME", "unit_price"],
            &["05_1", "Chair", "$10"],
        ]);
        let bindings = resolve_columns(&t, &NDIS_SCHEMA).expect("resolve");
        assert_eq!(bindings.column(ITEM_CODE), Some(0));
        assert_eq!(bindings.column(ITEM_NAME), Some(1));
        assert_eq!(bindings.column(UNIT_PRICE), Some(2));
    }

    #[test]
    fn description_goes_to_description_when_name_exists() {
        let t = table(&[
            &["Code", "Description", "Support Item Name"],
            &["05_1", "A sturdy chair", "Chair"],
        ]);
        let bindings = resolve_columns(&t, &NDIS_SCHEMA).expect("resolve");
        assert_eq!(bindings.column(ITEM_NAME), Some(2));
        assert_eq!(bindings.column(DESCRIPTION), Some(1));
    }

    #[test]
    fn description_names_item_when_nothing_better() {
        let t = table(&[&["Code", "Description"], &["05_1", "Chair"]]);
        let bindings = resolve_columns(&t, &NDIS_SCHEMA).expect("resolve");
        assert_eq!(bindings.column(ITEM_NAME), Some(1));
        assert_eq!(bindings.column(DESCRIPTION), None);
    }

    #[test]
    fn heuristics_find_code_and_name() {
        let t = table(&[
            &["Col A", "Col B", "Col C"],
            &["1500.00", "05_122203111_0103_1_2", "Manual wheelchair, folding frame"],
            &["250.50", "05_122203112_0103_1_2", "Power wheelchair"],
        ]);
        let bindings = resolve_columns(&t, &NDIS_SCHEMA).expect("resolve");
        let code = bindings.get(ITEM_CODE).expect("code");
        assert_eq!(code.column, 1);
        assert_eq!(code.resolution, Resolution::Heuristic);
        let name = bindings.get(ITEM_NAME).expect("name");
        assert_eq!(name.column, 2);
        assert_eq!(name.resolution, Resolution::Heuristic);
    }

    #[test]
    fn unresolvable_required_field_is_an_error() {
        let t = table(&[&["Foo", "Bar"], &["hello", "world"]]);
        let err = resolve_columns(&t, &NDIS_SCHEMA).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvedField {
                field: ITEM_CODE,
                ..
            }
        ));

        let t = table(&[&["Category", "Notes"], &["Vision", "x"]]);
        let err = resolve_columns(&t, &ENABLENSW_SCHEMA).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvedField {
                field: SUBCATEGORY,
                ..
            }
        ));
    }

    #[test]
    fn code_like_values() {
        assert!(is_code_like("05_122203111_0103_1_2"));
        assert!(is_code_like("AT-0042"));
        assert!(is_code_like("A1"));
        assert!(!is_code_like("1500.00"));
        assert!(!is_code_like("Manual wheelchair"));
        assert!(!is_code_like("abc"));
        assert!(!is_code_like("7"));
    }
}
