use crate::schema::{Gender, STATUS_ACTIVE, Student};
use rosterdb_core::{
    db::{Criteria, Filter, Key, Resolution, Store, resolve},
    error::Error,
};

/// Keyword search covers the human-facing identity columns.
const KEYWORD_FIELDS: &[&str] = &["name", "student_number", "phone_number"];

///
/// StudentDirectory
///

#[derive(Debug, Default)]
pub struct StudentDirectory {
    store: Store<Student>,
    next_id: u64,
}

impl StudentDirectory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: Store::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store<Student> {
        &self.store
    }

    /// Enroll a student; the directory assigns the id and enforces a
    /// unique student number. Status defaults to active when unset.
    pub fn enroll(&mut self, mut student: Student) -> Result<Student, Error> {
        if self.student_number_taken(&student.student_number)? {
            return Err(Error::directory_conflict("student number already exists"));
        }

        self.next_id += 1;
        student.id = self.next_id;
        if student.status == 0 {
            student.status = STATUS_ACTIVE;
        }
        self.store.insert(student.clone());

        Ok(student)
    }

    pub fn by_id(&self, id: u64) -> Result<Student, Error> {
        self.store
            .try_get(&Key::Uint(id))
            .map_err(|_| Error::directory_not_found("student does not exist"))
    }

    pub fn by_student_number(&self, student_number: &str) -> Result<Student, Error> {
        self.store
            .load()
            .filter(Filter::eq("student_number", student_number))
            .execute()?
            .one_opt_record()?
            .ok_or_else(|| {
                Error::directory_not_found(format!("student does not exist: {student_number}"))
            })
    }

    pub fn student_number_taken(&self, student_number: &str) -> Result<bool, Error> {
        self.store
            .load()
            .filter(Filter::eq("student_number", student_number))
            .exists()
    }

    pub fn by_class(&self, class_id: &str) -> Result<Vec<Student>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::eq("class_id", class_id))
            .execute()?
            .records())
    }

    pub fn count_in_class(&self, class_id: &str) -> Result<u32, Error> {
        self.store
            .load()
            .filter(Filter::eq("class_id", class_id))
            .count()
    }

    pub fn by_gender(&self, gender: Gender) -> Result<Vec<Student>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::eq("gender", gender))
            .execute()?
            .records())
    }

    pub fn by_name(&self, name: &str) -> Result<Student, Error> {
        self.store
            .load()
            .filter(Filter::eq("name", name))
            .execute()?
            .one_opt_record()?
            .ok_or_else(|| Error::directory_not_found(format!("student does not exist: {name}")))
    }

    pub fn search_by_name(&self, name: &str) -> Result<Vec<Student>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::contains("name", name))
            .execute()?
            .records())
    }

    /// Paged substring search over names, ordered by id.
    pub fn search_by_name_page(
        &self,
        name: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Student>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::contains("name", name))
            .order_by("id")
            .offset(offset)
            .limit(limit)
            .execute()?
            .records())
    }

    /// Multi-criteria search: one keyword substring-matched across name,
    /// student number, and phone number, AND an optional exact class.
    pub fn search(
        &self,
        keyword: Option<&str>,
        class_id: Option<&str>,
    ) -> Result<Vec<Student>, Error> {
        let filter = Criteria::new()
            .any_contains(KEYWORD_FIELDS, keyword)
            .exact("class_id", class_id)
            .compose();

        Ok(self.store.load().filter(filter).execute()?.records())
    }

    /// Exact-then-fuzzy name lookup.
    pub fn by_name_resolved(&self, name: &str) -> Result<Resolution<Student>, Error> {
        resolve(
            name,
            |key| self.by_name(key),
            |key| self.search_by_name(key),
        )
    }

    pub fn remove(&mut self, id: u64) -> Result<Student, Error> {
        self.store
            .remove(&Key::Uint(id))
            .ok_or_else(|| Error::directory_not_found("student does not exist"))
    }

    /// Remove every student whose number is in the list; returns how many
    /// rows went away.
    pub fn remove_many(&mut self, student_numbers: &[&str]) -> Result<u32, Error> {
        let doomed = self
            .store
            .load()
            .filter(Filter::in_iter("student_number", student_numbers.iter().copied()))
            .execute()?
            .keys();

        for key in &doomed {
            self.store.remove(key);
        }

        #[allow(clippy::cast_possible_truncation)]
        let removed = doomed.len() as u32;

        Ok(removed)
    }
}

///
/// TESTS
///
