use crate::schema::Employee;
use rosterdb_core::{
    db::{Criteria, Filter, Key, Resolution, Store, resolve},
    error::Error,
};

///
/// EmployeeDirectory
///

#[derive(Debug, Default)]
pub struct EmployeeDirectory {
    store: Store<Employee>,
    next_id: u64,
}

impl EmployeeDirectory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: Store::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store<Employee> {
        &self.store
    }

    /// Add an employee; the directory assigns the id and enforces unique
    /// username and employee number.
    pub fn add(&mut self, mut employee: Employee) -> Result<Employee, Error> {
        if self.username_taken(&employee.username)? {
            return Err(Error::directory_conflict("username already exists"));
        }
        if self.employee_number_taken(&employee.employee_number)? {
            return Err(Error::directory_conflict("employee number already exists"));
        }

        self.next_id += 1;
        employee.id = self.next_id;
        self.store.insert(employee.clone());

        Ok(employee)
    }

    pub fn by_id(&self, id: u64) -> Result<Employee, Error> {
        self.store
            .try_get(&Key::Uint(id))
            .map_err(|_| Error::directory_not_found("employee does not exist"))
    }

    pub fn by_username(&self, username: &str) -> Result<Employee, Error> {
        self.store
            .load()
            .filter(Filter::eq("username", username))
            .execute()?
            .one_opt_record()?
            .ok_or_else(|| Error::directory_not_found(format!("employee does not exist: {username}")))
    }

    pub fn by_employee_number(&self, employee_number: &str) -> Result<Employee, Error> {
        self.store
            .load()
            .filter(Filter::eq("employee_number", employee_number))
            .execute()?
            .one_opt_record()?
            .ok_or_else(|| {
                Error::directory_not_found(format!("employee does not exist: {employee_number}"))
            })
    }

    pub fn username_taken(&self, username: &str) -> Result<bool, Error> {
        self.store
            .load()
            .filter(Filter::eq("username", username))
            .exists()
    }

    pub fn employee_number_taken(&self, employee_number: &str) -> Result<bool, Error> {
        self.store
            .load()
            .filter(Filter::eq("employee_number", employee_number))
            .exists()
    }

    pub fn by_department(&self, department_id: u64) -> Result<Vec<Employee>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::eq("department_id", department_id))
            .execute()?
            .records())
    }

    pub fn count_in_department(&self, department_id: u64) -> Result<u32, Error> {
        self.store
            .load()
            .filter(Filter::eq("department_id", department_id))
            .count()
    }

    /// Exact lookup by name. Names are not unique identities; a duplicate
    /// surfaces as a response invariant error rather than a guess.
    pub fn by_name(&self, name: &str) -> Result<Employee, Error> {
        self.store
            .load()
            .filter(Filter::eq("name", name))
            .execute()?
            .one_opt_record()?
            .ok_or_else(|| Error::directory_not_found(format!("employee does not exist: {name}")))
    }

    pub fn search_by_name(&self, name: &str) -> Result<Vec<Employee>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::contains("name", name))
            .execute()?
            .records())
    }

    pub fn search_by_position(&self, position: &str) -> Result<Vec<Employee>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::contains("position", position))
            .execute()?
            .records())
    }

    /// Multi-criteria search: every supplied input narrows the result,
    /// every absent input is ignored, and no inputs at all returns the
    /// full roster.
    pub fn search(
        &self,
        name: Option<&str>,
        position: Option<&str>,
        department_id: Option<u64>,
    ) -> Result<Vec<Employee>, Error> {
        let filter = Criteria::new()
            .contains("name", name)
            .contains("position", position)
            .exact("department_id", department_id)
            .compose();

        Ok(self.store.load().filter(filter).execute()?.records())
    }

    /// Exact-then-fuzzy name lookup.
    pub fn by_name_resolved(&self, name: &str) -> Result<Resolution<Employee>, Error> {
        resolve(
            name,
            |key| self.by_name(key),
            |key| self.search_by_name(key),
        )
    }

    pub fn remove(&mut self, id: u64) -> Result<Employee, Error> {
        self.store
            .remove(&Key::Uint(id))
            .ok_or_else(|| Error::directory_not_found("employee does not exist"))
    }
}

///
/// TESTS
///
