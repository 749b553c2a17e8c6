//! Fixed and free MPS.
//!
//! Names may not contain spaces; fields are split on whitespace, which reads
//! both layouts.

use std::collections::HashMap;
use std::fmt::Write as _;

use super::{Draft, FormatError, RowSpec, SosSpec, WriteNames, format_exact};
use crate::model::{Model, default_row_name};
use crate::types::{DEFAULT_INFINITY, Relation};

const RHS_SET: &str = "RHS";
const RANGE_SET: &str = "RGS";
const BOUND_SET: &str = "BND";

/// Render the model as fixed-layout MPS.
pub fn to_mps_string(model: &Model) -> String {
    let mut out = String::new();
    let infinity = model.get_infinite();
    let names = WriteNames::new(model);
    let row_name = |row: usize| names.row(row);
    let column_name = |column: usize| names.column(column);

    let _ = writeln!(out, "*<meta creator='lpbind'>");
    let _ = writeln!(out, "*<meta rows={}>", model.rows());
    let _ = writeln!(out, "*<meta columns={}>", model.columns());
    if model.get_lp_name() != crate::model::UNNAMED_MODEL {
        let _ = writeln!(out, "NAME                {}", model.get_lp_name());
    } else {
        let _ = writeln!(out, "NAME");
    }
    if model.is_maxim() {
        let _ = writeln!(out, "OBJSENSE\n    MAX");
    }

    let _ = writeln!(out, "ROWS");
    let _ = writeln!(out, " N  {}", row_name(0));
    for (ordinal, row) in model.row_iter() {
        let kind = match row.relation {
            Relation::Free => "N",
            Relation::LessEqual => "L",
            Relation::GreaterEqual => "G",
            Relation::Equal => "E",
        };
        let _ = writeln!(out, " {kind}  {}", row_name(ordinal));
    }

    let mut by_column: Vec<Vec<(usize, f64)>> = vec![Vec::new(); model.columns() + 1];
    for &(column, value) in model.objective_terms() {
        by_column[column].push((0, value));
    }
    for (ordinal, row) in model.row_iter() {
        for &(column, value) in &row.coefficients {
            by_column[column].push((ordinal, value));
        }
    }

    let _ = writeln!(out, "COLUMNS");
    let mut in_marker = false;
    for (ordinal, column) in model.column_iter() {
        if column.is_int != in_marker {
            let kind = if column.is_int { "INTORG" } else { "INTEND" };
            let _ = writeln!(out, "    MARKER                 'MARKER'                 '{kind}'");
            in_marker = column.is_int;
        }
        let name = column_name(ordinal);
        if by_column[ordinal].is_empty() {
            let _ = writeln!(out, "    {name:<8}  {:<8}  {:>12}", row_name(0), 0);
        }
        for &(row, value) in &by_column[ordinal] {
            let _ = writeln!(
                out,
                "    {name:<8}  {:<8}  {:>12}",
                row_name(row),
                format_exact(value)
            );
        }
    }
    if in_marker {
        let _ = writeln!(out, "    MARKER                 'MARKER'                 'INTEND'");
    }

    let _ = writeln!(out, "RHS");
    if model.objective_constant() != 0.0 {
        let _ = writeln!(
            out,
            "    {RHS_SET:<8}  {:<8}  {:>12}",
            row_name(0),
            format_exact(-model.objective_constant())
        );
    }
    for (ordinal, row) in model.row_iter() {
        if row.rhs != 0.0 && row.relation != Relation::Free {
            let _ = writeln!(
                out,
                "    {RHS_SET:<8}  {:<8}  {:>12}",
                row_name(ordinal),
                format_exact(row.rhs)
            );
        }
    }

    let ranged: Vec<(usize, f64)> = model
        .row_iter()
        .filter_map(|(ordinal, row)| {
            let delta = row.range?;
            Some(match row.relation {
                Relation::Equal => (ordinal, delta),
                _ => (ordinal, delta.abs()),
            })
        })
        .collect();
    if !ranged.is_empty() {
        let _ = writeln!(out, "RANGES");
        for (ordinal, delta) in ranged {
            let _ = writeln!(
                out,
                "    {RANGE_SET:<8}  {:<8}  {:>12}",
                row_name(ordinal),
                format_exact(delta)
            );
        }
    }

    let mut bounds = String::new();
    for (ordinal, column) in model.column_iter() {
        let name = column_name(ordinal);
        let mut line = |kind: &str, value: Option<f64>| {
            let _ = match value {
                Some(value) => writeln!(
                    bounds,
                    " {kind} {BOUND_SET:<8}  {name:<8}  {:>12}",
                    format_exact(value)
                ),
                None => writeln!(bounds, " {kind} {BOUND_SET:<8}  {name}"),
            };
        };
        let lower_free = column.lower <= -infinity;
        let upper_free = column.upper >= infinity;
        if column.is_semicont {
            line("SC", Some(column.upper.min(infinity)));
            if lower_free {
                line("MI", None);
            } else if column.lower != 0.0 {
                line("LO", Some(column.lower));
            }
            continue;
        }
        if lower_free && upper_free {
            line("FR", None);
        } else if column.lower == column.upper {
            line("FX", Some(column.lower));
        } else {
            if lower_free {
                line("MI", None);
            }
            if !upper_free {
                line("UP", Some(column.upper));
            }
            if !lower_free && (column.lower != 0.0 || column.upper < 0.0) {
                line("LO", Some(column.lower));
            }
        }
    }
    if !bounds.is_empty() {
        let _ = write!(out, "BOUNDS\n{bounds}");
    }

    if !model.sos_groups().is_empty() {
        let _ = writeln!(out, "SOS");
        for group in model.sos_groups() {
            let _ = writeln!(
                out,
                " S{} SOS       {:<8}  {}",
                group.sos_type, group.name, group.priority
            );
            for &(column, weight) in &group.members {
                let Some(column) = usize::try_from(column)
                    .ok()
                    .filter(|c| (1..=model.columns()).contains(c))
                else {
                    continue;
                };
                let _ = writeln!(
                    out,
                    "    {:<8}  {:<8}  {:>12}",
                    group.name,
                    column_name(column),
                    format_exact(weight)
                );
            }
        }
    }
    let _ = writeln!(out, "ENDATA");
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Preamble,
    ObjSense,
    Rows,
    Columns,
    Rhs,
    Ranges,
    Bounds,
    Sos,
    End,
}

fn section_of(word: &str) -> Option<Section> {
    Some(match word.to_ascii_uppercase().as_str() {
        "NAME" => Section::Preamble,
        "OBJSENSE" => Section::ObjSense,
        "ROWS" => Section::Rows,
        "COLUMNS" => Section::Columns,
        "RHS" => Section::Rhs,
        "RANGES" => Section::Ranges,
        "BOUNDS" => Section::Bounds,
        "SOS" => Section::Sos,
        "ENDATA" => Section::End,
        _ => return None,
    })
}

#[derive(Debug, Default)]
struct MpsReader {
    draft: Draft,
    /// Row name to ordinal; the objective is row 0.
    rows: HashMap<String, usize>,
    objective: Option<String>,
    in_integer_block: bool,
    ranges: Vec<(usize, f64)>,
}

impl MpsReader {
    fn number(token: &str, line: usize) -> Result<f64, FormatError> {
        token
            .parse::<f64>()
            .map_err(|_| FormatError::parse(line, format!("bad number '{token}'")))
    }

    fn row(&self, name: &str, line: usize) -> Result<usize, FormatError> {
        self.rows
            .get(name)
            .copied()
            .ok_or_else(|| FormatError::parse(line, format!("unknown row '{name}'")))
    }

    fn known_column(&self, name: &str, line: usize) -> Result<usize, FormatError> {
        self.draft
            .column_index
            .get(name)
            .copied()
            .ok_or_else(|| FormatError::parse(line, format!("unknown column '{name}'")))
    }

    fn add_row(&mut self, fields: &[&str], line: usize) -> Result<(), FormatError> {
        let [kind, name] = fields else {
            return Err(FormatError::parse(line, "ROWS entry needs a type and a name"));
        };
        let relation = match kind.to_ascii_uppercase().as_str() {
            "N" if self.objective.is_none() => {
                self.objective = Some((*name).to_string());
                self.rows.insert((*name).to_string(), 0);
                return Ok(());
            }
            "N" => Relation::Free,
            "L" => Relation::LessEqual,
            "G" => Relation::GreaterEqual,
            "E" => Relation::Equal,
            other => return Err(FormatError::parse(line, format!("unknown row type '{other}'"))),
        };
        self.draft.rows.push(RowSpec {
            name: Some((*name).to_string()),
            terms: Vec::new(),
            relation,
            rhs: 0.0,
            range: None,
        });
        self.rows.insert((*name).to_string(), self.draft.rows.len());
        Ok(())
    }

    fn add_column_entry(&mut self, fields: &[&str], line: usize) -> Result<(), FormatError> {
        if fields.len() >= 3 && fields[1].trim_matches('\'').eq_ignore_ascii_case("MARKER") {
            match fields[2].trim_matches('\'').to_ascii_uppercase().as_str() {
                "INTORG" => self.in_integer_block = true,
                "INTEND" => self.in_integer_block = false,
                other => {
                    return Err(FormatError::parse(line, format!("unknown marker '{other}'")));
                }
            }
            return Ok(());
        }
        let [name, pairs @ ..] = fields else {
            return Err(FormatError::parse(line, "empty COLUMNS entry"));
        };
        if pairs.is_empty() || pairs.len() % 2 != 0 {
            return Err(FormatError::parse(line, "COLUMNS entry needs row/value pairs"));
        }
        let is_new = !self.draft.column_index.contains_key(*name);
        let column = self.draft.column(name);
        if is_new && self.in_integer_block {
            self.draft.columns[column - 1].is_int = true;
        }
        for pair in pairs.chunks(2) {
            let row = self.row(pair[0], line)?;
            let value = Self::number(pair[1], line)?;
            if value == 0.0 {
                continue;
            }
            if row == 0 {
                self.draft.objective.push((column, value));
            } else {
                self.draft.rows[row - 1].terms.push((column, value));
            }
        }
        Ok(())
    }

    /// RHS and RANGES entries: an optional set name, then row/value pairs.
    fn row_values(&self, fields: &[&str], line: usize) -> Result<Vec<(usize, f64)>, FormatError> {
        let pairs = if fields.len() % 2 == 1 {
            &fields[1..]
        } else {
            fields
        };
        if pairs.is_empty() {
            return Err(FormatError::parse(line, "entry needs row/value pairs"));
        }
        pairs
            .chunks(2)
            .map(|pair| Ok((self.row(pair[0], line)?, Self::number(pair[1], line)?)))
            .collect()
    }

    fn add_rhs(&mut self, fields: &[&str], line: usize) -> Result<(), FormatError> {
        for (row, value) in self.row_values(fields, line)? {
            if row == 0 {
                self.draft.objective_constant = -value;
            } else {
                self.draft.rows[row - 1].rhs = value;
            }
        }
        Ok(())
    }

    fn add_range(&mut self, fields: &[&str], line: usize) -> Result<(), FormatError> {
        for (row, value) in self.row_values(fields, line)? {
            if row == 0 {
                return Err(FormatError::parse(line, "range on the objective row"));
            }
            self.ranges.push((row, value));
        }
        Ok(())
    }

    fn add_bound(&mut self, fields: &[&str], line: usize) -> Result<(), FormatError> {
        let [kind, rest @ ..] = fields else {
            return Err(FormatError::parse(line, "empty BOUNDS entry"));
        };
        let kind = kind.to_ascii_uppercase();
        let without_set = match rest {
            [column] => self.draft.column_index.contains_key(*column).then_some((*column, None)),
            [column, value] if self.draft.column_index.contains_key(*column) => {
                value.parse::<f64>().ok().map(|v| (*column, Some(v)))
            }
            _ => None,
        };
        let (name, value) = match (without_set, rest) {
            (Some(found), _) => found,
            (None, [_, column]) => (*column, None),
            (None, [_, column, value]) => (*column, Some(Self::number(value, line)?)),
            _ => return Err(FormatError::parse(line, "malformed BOUNDS entry")),
        };
        let column = self.known_column(name, line)?;
        let needs_value = matches!(kind.as_str(), "UP" | "LO" | "FX" | "LI" | "UI");
        let value = match value {
            Some(value) => value,
            None if needs_value => {
                return Err(FormatError::parse(line, format!("{kind} bound needs a value")));
            }
            None => 0.0,
        };

        let spec = &mut self.draft.columns[column - 1];
        match kind.as_str() {
            "UP" | "UI" => {
                spec.upper = value;
                if value < 0.0 && spec.lower == 0.0 {
                    spec.lower = -DEFAULT_INFINITY;
                }
                spec.is_int |= kind == "UI";
            }
            "LO" | "LI" => {
                spec.lower = value;
                spec.is_int |= kind == "LI";
            }
            "FX" => {
                spec.lower = value;
                spec.upper = value;
            }
            "FR" => {
                spec.lower = -DEFAULT_INFINITY;
                spec.upper = DEFAULT_INFINITY;
            }
            "MI" => spec.lower = -DEFAULT_INFINITY,
            "PL" => spec.upper = DEFAULT_INFINITY,
            "BV" => {
                spec.is_int = true;
                spec.lower = 0.0;
                spec.upper = 1.0;
            }
            "SC" => {
                spec.is_semicont = true;
                spec.upper = if value == 0.0 { DEFAULT_INFINITY } else { value };
            }
            other => return Err(FormatError::parse(line, format!("unknown bound type '{other}'"))),
        }
        Ok(())
    }

    fn add_sos_line(&mut self, fields: &[&str], line: usize) -> Result<(), FormatError> {
        if let [kind, marker, rest @ ..] = fields
            && marker.eq_ignore_ascii_case("SOS")
            && let Some(sos_type) = kind
                .strip_prefix(['S', 's'])
                .and_then(|n| n.parse::<i32>().ok())
        {
            let name = rest.first().map_or_else(
                || format!("SOS{}", self.draft.sos.len() + 1),
                |name| (*name).to_string(),
            );
            let priority = match rest.get(1) {
                Some(value) => Self::number(value, line)? as i32,
                None => self.draft.sos.len() as i32 + 1,
            };
            self.draft.sos.push(SosSpec {
                name,
                sos_type,
                priority,
                members: Vec::new(),
            });
            return Ok(());
        }

        let (column, weight) = match fields {
            [_, column, weight] | [column, weight] => (*column, Self::number(weight, line)?),
            [pair] => match pair.split_once(':') {
                Some((column, weight)) => (column, Self::number(weight, line)?),
                None => return Err(FormatError::parse(line, "malformed SOS member")),
            },
            _ => return Err(FormatError::parse(line, "malformed SOS member")),
        };
        let column = self.known_column(column, line)?;
        let Some(group) = self.draft.sos.last_mut() else {
            return Err(FormatError::parse(line, "SOS member before set header"));
        };
        group.members.push((column, weight));
        Ok(())
    }

    fn finish(mut self) -> Result<Model, FormatError> {
        for (row, delta) in self.ranges {
            self.draft.rows[row - 1].range = Some(delta);
        }
        if let Some(name) = self.objective.filter(|name| *name != default_row_name(0)) {
            self.draft.objective_name = Some(name);
        }
        self.draft.build()
    }
}

/// Parse fixed or free MPS text into a model.
pub fn parse_mps(text: &str) -> Result<Model, FormatError> {
    let mut reader = MpsReader::default();
    let mut section = Section::Preamble;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() || raw.starts_with('*') {
            continue;
        }
        let fields: Vec<&str> = raw.split_whitespace().collect();
        let is_header = !raw.starts_with(char::is_whitespace);
        if is_header && let Some(next) = section_of(fields[0]) {
            section = next;
            match (section, fields.get(1)) {
                (Section::Preamble, Some(name)) => reader.draft.name = Some((*name).to_string()),
                (Section::ObjSense, Some(sense)) => reader.draft.maximize = is_max(sense),
                _ => {}
            }
            if section == Section::End {
                break;
            }
            continue;
        }
        match section {
            Section::Preamble => {
                return Err(FormatError::parse(line, "data before the first section"));
            }
            Section::ObjSense => reader.draft.maximize = is_max(fields[0]),
            Section::Rows => reader.add_row(&fields, line)?,
            Section::Columns => reader.add_column_entry(&fields, line)?,
            Section::Rhs => reader.add_rhs(&fields, line)?,
            Section::Ranges => reader.add_range(&fields, line)?,
            Section::Bounds => reader.add_bound(&fields, line)?,
            Section::Sos => reader.add_sos_line(&fields, line)?,
            Section::End => break,
        }
    }
    reader.finish()
}

fn is_max(word: &str) -> bool {
    matches!(
        word.to_ascii_uppercase().as_str(),
        "MAX" | "MAXIMIZE" | "MAXIMISE"
    )
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NAME          TESTLP
ROWS
 N  COST
 L  LIM1
 G  LIM2
 E  MYEQN
COLUMNS
    MARKER                 'MARKER'                 'INTORG'
    X1        COST         1.0   LIM1         1.0
    X1        LIM2         1.0
    MARKER                 'MARKER'                 'INTEND'
    X2        COST         2.0   LIM1         1.0
    X2        MYEQN       -1.0
    X3        COST        -1.0   MYEQN        1.0
RHS
    RHS       COST        -3.5
    RHS       LIM1         4.0   LIM2         1.0
    RHS       MYEQN        7.0
RANGES
    RNG       LIM1         2.5
BOUNDS
 UP BND       X1           4.0
 MI BND       X2
 UP BND       X2           1.0
 SC BND       X3          10.0
ENDATA
";

    #[test]
    fn parses_sections() {
        let model = parse_mps(SAMPLE).unwrap();
        assert_eq!(model.get_lp_name(), "TESTLP");
        assert_eq!(model.rows(), 3);
        assert_eq!(model.columns(), 3);
        assert_eq!(model.get_row_name(0).unwrap(), "COST");
        assert_eq!(model.get_rh(0).unwrap(), 3.5);
        assert_eq!(model.get_mat(3, 2).unwrap(), -1.0);
        assert_eq!(model.row_bounds(1).unwrap(), (1.5, 4.0));
        assert_eq!(model.get_constr_type(2).unwrap(), Relation::GreaterEqual);
        assert!(model.is_int(1).unwrap());
        assert!(!model.is_int(2).unwrap());
        assert_eq!(model.get_upbo(1).unwrap(), 4.0);
        assert_eq!(model.get_lowbo(2).unwrap(), -1e30);
        assert!(model.is_semicont(3).unwrap());
        assert_eq!(model.get_upbo(3).unwrap(), 10.0);
    }

    #[test]
    fn negative_upper_bound_frees_lower() {
        let text = "NAME\nROWS\n N obj\nCOLUMNS\n    x obj 1\nBOUNDS\n UP BND x -2\nENDATA\n";
        let model = parse_mps(text).unwrap();
        assert_eq!(model.get_upbo(1).unwrap(), -2.0);
        assert_eq!(model.get_lowbo(1).unwrap(), -1e30);
    }

    #[test]
    fn unknown_row_is_a_parse_error() {
        let text = "NAME\nROWS\n N obj\nCOLUMNS\n    x nope 1\nENDATA\n";
        let err = parse_mps(text).unwrap_err();
        assert_eq!(err.code(), "PARSE_ERROR");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn objsense_and_sos() {
        let text = "NAME\nOBJSENSE\n    MAX\nROWS\n N obj\nCOLUMNS\n    x obj 1\n    y obj 1\n\
                    SOS\n S1 SOS s1 3\n    s1 x 1\n    s1 y 2\nENDATA\n";
        let model = parse_mps(text).unwrap();
        assert!(model.is_maxim());
        let group = &model.sos_groups()[0];
        assert_eq!(group.sos_type, 1);
        assert_eq!(group.priority, 3);
        assert_eq!(group.members, vec![(1, 1.0), (2, 2.0)]);
    }
}
