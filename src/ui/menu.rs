use crate::data::aggregate::AggregateOp;
use crate::data::filter::Condition;

// ---------------------------------------------------------------------------
// Main menu
// ---------------------------------------------------------------------------

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Display,
    Filter,
    Sort,
    Aggregate,
    Palindromes,
    Save,
    Columns,
    Reset,
    Exit,
}

impl MenuChoice {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key.trim() {
            "1" => MenuChoice::Display,
            "2" => MenuChoice::Filter,
            "3" => MenuChoice::Sort,
            "4" => MenuChoice::Aggregate,
            "5" => MenuChoice::Palindromes,
            "6" => MenuChoice::Save,
            "7" => MenuChoice::Columns,
            "8" => MenuChoice::Reset,
            "9" => MenuChoice::Exit,
            _ => return None,
        })
    }
}

pub const MAIN_MENU: &str = "\
\nTabular Explorer Menu:
1. Display first N rows
2. Filter rows
3. Sort rows
4. Aggregate data
5. Count palindromes
6. Save to new file
7. Display available columns
8. Reset to original data
9. Exit";

// ---------------------------------------------------------------------------
// Sub-menus
// ---------------------------------------------------------------------------

pub const FILTER_MENU: &str = "\
\nFilter options:
1. Greater than (>)
2. Less than (<)
3. Equal to (==)
4. Contains (string)";

pub fn filter_condition(key: &str) -> Option<Condition> {
    match key.trim() {
        "1" => Some(Condition::GreaterThan),
        "2" => Some(Condition::LessThan),
        "3" => Some(Condition::Equals),
        "4" => Some(Condition::Contains),
        _ => None,
    }
}

pub const AGGREGATE_MENU: &str = "\
\nAggregation options:
1. Sum
2. Mean (Average)
3. Minimum
4. Maximum";

pub fn aggregate_op(key: &str) -> Option<AggregateOp> {
    match key.trim() {
        "1" => Some(AggregateOp::Sum),
        "2" => Some(AggregateOp::Mean),
        "3" => Some(AggregateOp::Min),
        "4" => Some(AggregateOp::Max),
        _ => None,
    }
}
