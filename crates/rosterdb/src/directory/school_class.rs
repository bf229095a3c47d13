use crate::{
    directory::StudentDirectory,
    schema::{ClassStatus, SchoolClass},
};
use chrono::NaiveDate;
use rosterdb_core::{
    db::{Criteria, Filter, Key, Resolution, Store, resolve},
    error::Error,
    traits::Record,
};

///
/// ClassDirectory
///

#[derive(Debug, Default)]
pub struct ClassDirectory {
    store: Store<SchoolClass>,
    next_seq: u64,
}

impl ClassDirectory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: Store::new(),
            next_seq: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store<SchoolClass> {
        &self.store
    }

    /// Create a class. A blank class id gets a generated one; a supplied
    /// id must not collide.
    pub fn create(&mut self, mut class: SchoolClass) -> Result<SchoolClass, Error> {
        if class.class_id.trim().is_empty() {
            class.class_id = self.generate_class_id();
        } else if self.store.contains_key(&class.key()) {
            return Err(Error::directory_conflict("class id already exists"));
        }

        self.store.insert(class.clone());

        Ok(class)
    }

    pub fn by_id(&self, class_id: &str) -> Result<SchoolClass, Error> {
        self.store
            .try_get(&Key::from(class_id))
            .map_err(|_| Error::directory_not_found("class does not exist"))
    }

    /// Exact lookup by class name.
    pub fn by_name(&self, name: &str) -> Result<SchoolClass, Error> {
        self.store
            .load()
            .filter(Filter::eq("name", name))
            .execute()?
            .one_opt_record()?
            .ok_or_else(|| Error::directory_not_found(format!("class does not exist: {name}")))
    }

    pub fn search_by_name(&self, name: &str) -> Result<Vec<SchoolClass>, Error> {
        self.search_containing("name", name)
    }

    pub fn search_by_grade(&self, grade: &str) -> Result<Vec<SchoolClass>, Error> {
        self.search_containing("grade", grade)
    }

    pub fn search_by_classroom(&self, classroom: &str) -> Result<Vec<SchoolClass>, Error> {
        self.search_containing("classroom", classroom)
    }

    pub fn by_status(&self, status: ClassStatus) -> Result<Vec<SchoolClass>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::eq("status", status))
            .execute()?
            .records())
    }

    pub fn by_head_teacher(&self, head_teacher_id: u64) -> Result<Vec<SchoolClass>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::eq("head_teacher_id", head_teacher_id))
            .execute()?
            .records())
    }

    /// Classes whose whole run falls inside the window.
    pub fn in_date_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<SchoolClass>, Error> {
        let filter = Filter::gte("start_date", from).and(Filter::lte("end_date", to));

        Ok(self.store.load().filter(filter).execute()?.records())
    }

    /// Multi-criteria search across name, grade, classroom, status, and
    /// head teacher. Absent inputs are ignored; none at all means every
    /// class.
    pub fn search(
        &self,
        name: Option<&str>,
        grade: Option<&str>,
        classroom: Option<&str>,
        status: Option<ClassStatus>,
        head_teacher_id: Option<u64>,
    ) -> Result<Vec<SchoolClass>, Error> {
        let filter = Criteria::new()
            .contains("name", name)
            .contains("grade", grade)
            .contains("classroom", classroom)
            .exact("status", status)
            .exact("head_teacher_id", head_teacher_id)
            .compose();

        Ok(self.store.load().filter(filter).execute()?.records())
    }

    /// Exact-then-fuzzy name lookup.
    pub fn by_name_resolved(&self, name: &str) -> Result<Resolution<SchoolClass>, Error> {
        resolve(
            name,
            |key| self.by_name(key),
            |key| self.search_by_name(key),
        )
    }

    /// Remove a class; refuses while students still belong to it.
    pub fn remove(
        &mut self,
        class_id: &str,
        students: &StudentDirectory,
    ) -> Result<SchoolClass, Error> {
        let class = self.by_id(class_id)?;

        if students.count_in_class(class_id)? > 0 {
            return Err(Error::directory_conflict(
                "class still has students and cannot be removed",
            ));
        }

        self.store.remove(&Key::from(class_id));

        Ok(class)
    }

    fn search_containing(&self, field: &str, value: &str) -> Result<Vec<SchoolClass>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::contains(field, value))
            .execute()?
            .records())
    }

    fn generate_class_id(&mut self) -> String {
        loop {
            self.next_seq += 1;
            let seq = self.next_seq;
            let candidate = format!("class-{seq:04}");
            if !self.store.contains_key(&Key::from(candidate.as_str())) {
                return candidate;
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn class(name: &str, grade: &str, classroom: Option<&str>, status: ClassStatus) -> SchoolClass {
        SchoolClass {
            name: name.to_string(),
            grade: grade.to_string(),
            classroom: classroom.map(ToString::to_string),
            status,
            ..SchoolClass::default()
        }
    }

    fn directory() -> ClassDirectory {
        let mut directory = ClassDirectory::new();
        directory
            .create(SchoolClass {
                start_date: Some(date(2024, 9, 1)),
                end_date: Some(date(2025, 6, 30)),
                head_teacher_id: Some(7),
                ..class("CS Cohort A", "2024", Some("Building 2-101"), ClassStatus::Active)
            })
            .unwrap();
        directory
            .create(SchoolClass {
                start_date: Some(date(2023, 9, 1)),
                end_date: Some(date(2024, 6, 30)),
                ..class("CS Cohort B", "2023", Some("Building 2-102"), ClassStatus::Finished)
            })
            .unwrap();
        directory
            .create(class("Math Cohort A", "2024", None, ClassStatus::Pending))
            .unwrap();

        directory
    }

    #[test]
    fn create_generates_ids_for_blank_input() {
        let directory = directory();
        let ids: Vec<String> = directory
            .search(None, None, None, None, None)
            .unwrap()
            .into_iter()
            .map(|c| c.class_id)
            .collect();

        assert_eq!(ids, vec!["class-0001", "class-0002", "class-0003"]);
    }

    #[test]
    fn create_rejects_duplicate_explicit_id() {
        let mut directory = directory();
        let err = directory
            .create(SchoolClass {
                class_id: "class-0001".to_string(),
                ..class("Dup", "2024", None, ClassStatus::Pending)
            })
            .unwrap_err();

        assert_eq!(err.message, "class id already exists");
    }

    #[test]
    fn single_field_substring_searches() {
        let directory = directory();

        assert_eq!(directory.search_by_name("Cohort").unwrap().len(), 3);
        assert_eq!(directory.search_by_grade("2023").unwrap().len(), 1);
        assert_eq!(directory.search_by_classroom("Building 2").unwrap().len(), 2);
    }

    #[test]
    fn status_and_head_teacher_are_exact_matches() {
        let directory = directory();

        assert_eq!(directory.by_status(ClassStatus::Active).unwrap().len(), 1);
        assert_eq!(directory.by_head_teacher(7).unwrap().len(), 1);
        assert!(directory.by_head_teacher(8).unwrap().is_empty());
    }

    #[test]
    fn date_range_bounds_both_ends() {
        let directory = directory();
        let within = directory
            .in_date_range(date(2024, 1, 1), date(2025, 12, 31))
            .unwrap();

        assert_eq!(within.len(), 1);
        assert_eq!(within[0].name, "CS Cohort A");
    }

    #[test]
    fn advanced_search_composes_mixed_modes() {
        let directory = directory();
        let matched = directory
            .search(Some("Cohort"), Some("2024"), None, Some(ClassStatus::Active), None)
            .unwrap();

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "CS Cohort A");
    }

    #[test]
    fn advanced_search_with_no_inputs_returns_all() {
        let directory = directory();

        assert_eq!(directory.search(None, None, None, None, None).unwrap().len(), 3);
    }

    #[test]
    fn resolved_lookup_protocol() {
        let directory = directory();

        assert!(directory.by_name_resolved("CS Cohort A").unwrap().is_exact());
        assert!(directory.by_name_resolved("Cohort").unwrap().is_fuzzy());

        match directory.by_name_resolved("Art Cohort").unwrap() {
            Resolution::Missing { message } => {
                assert_eq!(message, "class does not exist: Art Cohort");
            }
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn remove_refuses_while_students_remain() {
        let mut directory = directory();
        let mut students = StudentDirectory::new();
        students
            .enroll(crate::schema::Student {
                student_number: "S-1".to_string(),
                name: "Chen Jing".to_string(),
                phone_number: "138".to_string(),
                class_id: Some("class-0001".to_string()),
                ..crate::schema::Student::default()
            })
            .unwrap();

        let err = directory.remove("class-0001", &students).unwrap_err();
        assert_eq!(err.message, "class still has students and cannot be removed");

        // still present
        assert!(directory.by_id("class-0001").is_ok());

        // unreferenced class removes fine
        directory.remove("class-0003", &students).unwrap();
        assert!(directory.by_id("class-0003").is_err());
    }
}
