use std::collections::HashSet;

/// Known employee codes and room names, compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    employee_codes: HashSet<String>,
    room_names: HashSet<String>,
}

impl Roster {
    pub fn new<E, R>(employee_codes: E, room_names: R) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self {
            employee_codes: normalize(employee_codes),
            room_names: normalize(room_names),
        }
    }

    pub fn is_employee(&self, value: &str) -> bool {
        self.employee_codes.contains(&value.trim().to_uppercase())
    }

    pub fn is_room(&self, value: &str) -> bool {
        self.room_names.contains(&value.trim().to_uppercase())
    }

    pub fn employee_count(&self) -> usize {
        self.employee_codes.len()
    }
}

fn normalize<I>(values: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_uppercase())
        .filter(|v| !v.is_empty())
        .collect()
}
