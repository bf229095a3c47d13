use crate::{directory::EmployeeDirectory, schema::Department};
use rosterdb_core::{
    db::{Filter, Key, Resolution, Store, resolve},
    error::Error,
};

///
/// DepartmentDirectory
///

#[derive(Debug, Default)]
pub struct DepartmentDirectory {
    store: Store<Department>,
    next_id: u64,
}

impl DepartmentDirectory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: Store::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store<Department> {
        &self.store
    }

    /// Create a department; names are unique.
    pub fn create(&mut self, name: impl Into<String>) -> Result<Department, Error> {
        let name = name.into();

        if self.name_exists(&name, None)? {
            return Err(Error::directory_conflict("department name already exists"));
        }

        self.next_id += 1;
        let department = Department::new(self.next_id, name);
        self.store.insert(department.clone());

        Ok(department)
    }

    pub fn all(&self) -> Result<Vec<Department>, Error> {
        Ok(self.store.load().execute()?.records())
    }

    pub fn by_id(&self, id: u64) -> Result<Department, Error> {
        self.store
            .try_get(&Key::Uint(id))
            .map_err(|_| Error::directory_not_found("department does not exist"))
    }

    /// Exact lookup by name; the miss message carries the name so the
    /// resolution fallback can surface it verbatim.
    pub fn by_name(&self, name: &str) -> Result<Department, Error> {
        self.store
            .load()
            .filter(Filter::eq("name", name))
            .execute()?
            .one_opt_record()?
            .ok_or_else(|| Error::directory_not_found(format!("department does not exist: {name}")))
    }

    /// Substring search by name.
    pub fn search_by_name(&self, name: &str) -> Result<Vec<Department>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::contains("name", name))
            .execute()?
            .records())
    }

    /// Exact-then-fuzzy name lookup.
    pub fn by_name_resolved(&self, name: &str) -> Result<Resolution<Department>, Error> {
        resolve(
            name,
            |key| self.by_name(key),
            |key| self.search_by_name(key),
        )
    }

    /// Rename a department; the new name must not belong to another one.
    pub fn rename(&mut self, id: u64, name: impl Into<String>) -> Result<Department, Error> {
        let name = name.into();
        let mut department = self.by_id(id)?;

        if self.name_exists(&name, Some(id))? {
            return Err(Error::directory_conflict("department name already exists"));
        }

        department.name = name;
        self.store.insert(department.clone());

        Ok(department)
    }

    /// Remove a department; refuses while employees still reference it.
    pub fn remove(&mut self, id: u64, employees: &EmployeeDirectory) -> Result<Department, Error> {
        let department = self.by_id(id)?;

        if !employees.by_department(id)?.is_empty() {
            return Err(Error::directory_conflict(
                "department still has employees and cannot be removed",
            ));
        }

        self.store.remove(&Key::Uint(id));

        Ok(department)
    }

    pub fn employee_count(&self, id: u64, employees: &EmployeeDirectory) -> Result<u32, Error> {
        self.by_id(id)?;

        employees.count_in_department(id)
    }

    fn name_exists(&self, name: &str, excluding_id: Option<u64>) -> Result<bool, Error> {
        let mut filter = Filter::eq("name", name);
        if let Some(id) = excluding_id {
            filter = filter.and(Filter::ne("id", id));
        }

        self.store.load().filter(filter).exists()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> DepartmentDirectory {
        let mut directory = DepartmentDirectory::new();
        directory.create("Mathematics").unwrap();
        directory.create("Computer Science").unwrap();
        directory.create("Physics").unwrap();

        directory
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let directory = directory();
        let all = directory.all().unwrap();

        let ids: Vec<u64> = all.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn create_duplicate_name_is_a_conflict() {
        let mut directory = directory();
        let err = directory.create("Physics").unwrap_err();

        assert_eq!(err.message, "department name already exists");
    }

    #[test]
    fn by_name_exact_hit() {
        let directory = directory();
        let department = directory.by_name("Physics").unwrap();

        assert_eq!(department.id, 3);
    }

    #[test]
    fn by_name_miss_message_names_the_key() {
        let directory = directory();
        let err = directory.by_name("History").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.message, "department does not exist: History");
    }

    #[test]
    fn search_by_name_is_substring() {
        let directory = directory();
        let matches = directory.search_by_name("ics").unwrap();

        let names: Vec<_> = matches.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Mathematics", "Physics"]);
    }

    #[test]
    fn resolved_lookup_prefers_exact() {
        let directory = directory();

        match directory.by_name_resolved("Physics").unwrap() {
            Resolution::Exact(d) => assert_eq!(d.name, "Physics"),
            other => panic!("expected Exact, got {other:?}"),
        }
    }

    #[test]
    fn resolved_lookup_falls_back_to_fuzzy() {
        let directory = directory();

        match directory.by_name_resolved("ics").unwrap() {
            Resolution::Fuzzy(list) => assert_eq!(list.len(), 2),
            other => panic!("expected Fuzzy, got {other:?}"),
        }
    }

    #[test]
    fn resolved_lookup_miss_keeps_exact_message() {
        let directory = directory();

        match directory.by_name_resolved("History").unwrap() {
            Resolution::Missing { message } => {
                assert_eq!(message, "department does not exist: History");
            }
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn rename_rejects_name_taken_by_another() {
        let mut directory = directory();
        let err = directory.rename(1, "Physics").unwrap_err();

        assert_eq!(err.message, "department name already exists");
    }

    #[test]
    fn rename_to_own_name_is_allowed() {
        let mut directory = directory();
        let department = directory.rename(1, "Mathematics").unwrap();

        assert_eq!(department.name, "Mathematics");
    }

    #[test]
    fn remove_without_employees_succeeds() {
        let mut directory = directory();
        let employees = EmployeeDirectory::new();

        directory.remove(2, &employees).unwrap();
        assert!(directory.by_id(2).is_err());
    }
}
