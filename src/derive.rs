use chrono::{Local, NaiveDate};

use crate::form::FieldEntry;

pub const DESCRIPTION_FIELD: &str = "description";
pub const TICKET_TYPE_FIELD: &str = "ticket_type";
pub const HOTFIX: &str = "hotfix";

/// Token for a description with no words in it.
pub const EMPTY_DESCRIPTION: &str = "xxx";
/// Token for any other empty field.
pub const EMPTY_VALUE: &str = "XXX";

pub const SEPARATOR: &str = "_";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Month (two digits), day of month (unpadded), four-digit year, no separators.
///
/// April 7 2024 is `0472024`. Existing branches use this shape, so the day stays unpadded.
pub fn hotfix_stamp(date: NaiveDate) -> String {
    date.format("%m%-d%Y").to_string()
}

pub fn format_token(entry: &FieldEntry, date: NaiveDate) -> String {
    if entry.name == DESCRIPTION_FIELD {
        let words: Vec<&str> = entry.value.split(' ').filter(|w| !w.is_empty()).collect();
        if words.is_empty() {
            return EMPTY_DESCRIPTION.to_string();
        }
        return words.join(SEPARATOR);
    }
    if entry.name == TICKET_TYPE_FIELD && entry.value == HOTFIX {
        return format!("{}{}{}", entry.value, SEPARATOR, hotfix_stamp(date));
    }
    if entry.value.is_empty() {
        EMPTY_VALUE.to_string()
    } else {
        entry.value.clone()
    }
}

/// Underscore-join the tokens of `fields` in order. Empty only when `fields` is.
pub fn derive_branch_name(fields: &[FieldEntry], date: NaiveDate) -> String {
    fields
        .iter()
        .map(|f| format_token(f, date))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn april_7() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 7).unwrap()
    }

    #[test]
    fn description_collapses_spaces() {
        let e = FieldEntry::new("description", "  hello   world  ");
        assert_eq!(format_token(&e, april_7()), "hello_world");
    }

    #[test]
    fn blank_description_is_lowercase_placeholder() {
        assert_eq!(format_token(&FieldEntry::new("description", "   "), april_7()), "xxx");
        assert_eq!(format_token(&FieldEntry::new("description", ""), april_7()), "xxx");
    }

    #[test]
    fn description_splits_on_spaces_only() {
        let e = FieldEntry::new("description", "tab\tkept here");
        assert_eq!(format_token(&e, april_7()), "tab\tkept_here");
    }

    #[test]
    fn hotfix_gets_date_stamp() {
        let e = FieldEntry::new("ticket_type", "hotfix");
        assert_eq!(format_token(&e, april_7()), "hotfix_0472024");
    }

    #[test]
    fn stamp_pads_month_not_day() {
        let d = NaiveDate::from_ymd_opt(2025, 11, 23).unwrap();
        assert_eq!(hotfix_stamp(d), "11232025");
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(hotfix_stamp(d), "0112025");
    }

    #[test]
    fn other_ticket_types_pass_through() {
        assert_eq!(format_token(&FieldEntry::new("ticket_type", "feature"), april_7()), "feature");
        assert_eq!(format_token(&FieldEntry::new("ticket_type", "Hotfix"), april_7()), "Hotfix");
        assert_eq!(format_token(&FieldEntry::new("ticket_type", ""), april_7()), "XXX");
    }

    #[test]
    fn other_fields_are_verbatim() {
        assert_eq!(format_token(&FieldEntry::new("project", " a b "), april_7()), " a b ");
        assert_eq!(format_token(&FieldEntry::new("project", ""), april_7()), "XXX");
    }

    #[test]
    fn end_to_end_join() {
        let fields = vec![
            FieldEntry::new("project", "core"),
            FieldEntry::new("ticket_type", "feature"),
            FieldEntry::new("description", " add   login "),
        ];
        assert_eq!(derive_branch_name(&fields, april_7()), "core_feature_add_login");
    }

    #[test]
    fn no_fields_derive_empty_string() {
        assert_eq!(derive_branch_name(&[], april_7()), "");
    }
}
