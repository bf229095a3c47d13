use crate::schema::Course;
use chrono::NaiveTime;
use rosterdb_core::{
    db::{Criteria, Filter, Key, Store},
    error::{Error, ErrorClass, ErrorOrigin},
};

///
/// CourseDirectory
///

#[derive(Debug, Default)]
pub struct CourseDirectory {
    store: Store<Course>,
    next_id: u64,
}

impl CourseDirectory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: Store::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store<Course> {
        &self.store
    }

    /// Add a course; the directory assigns the id. Week days are 1–7 and
    /// the time slot must not be inverted.
    pub fn add(&mut self, mut course: Course) -> Result<Course, Error> {
        if !(1..=7).contains(&course.week_day) {
            return Err(Error::new(
                ErrorClass::Unsupported,
                ErrorOrigin::Directory,
                format!("week day must be 1-7, got {}", course.week_day),
            ));
        }
        if course.end_time <= course.start_time {
            return Err(Error::new(
                ErrorClass::Unsupported,
                ErrorOrigin::Directory,
                "course end time must be after its start time",
            ));
        }

        self.next_id += 1;
        course.id = self.next_id;
        self.store.insert(course.clone());

        Ok(course)
    }

    pub fn by_id(&self, id: u64) -> Result<Course, Error> {
        self.store
            .try_get(&Key::Uint(id))
            .map_err(|_| Error::directory_not_found("course does not exist"))
    }

    pub fn search_by_name(&self, name: &str) -> Result<Vec<Course>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::contains("name", name))
            .execute()?
            .records())
    }

    pub fn by_class(&self, class_id: &str) -> Result<Vec<Course>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::eq("class_id", class_id))
            .execute()?
            .records())
    }

    pub fn by_teacher(&self, teacher_id: u64) -> Result<Vec<Course>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::eq("teacher_id", teacher_id))
            .execute()?
            .records())
    }

    pub fn by_class_and_teacher(
        &self,
        class_id: &str,
        teacher_id: u64,
    ) -> Result<Vec<Course>, Error> {
        let filter = Filter::eq("class_id", class_id).and(Filter::eq("teacher_id", teacher_id));

        Ok(self.store.load().filter(filter).execute()?.records())
    }

    pub fn by_week_day(&self, week_day: u8) -> Result<Vec<Course>, Error> {
        Ok(self
            .store
            .load()
            .filter(Filter::eq("week_day", week_day))
            .execute()?
            .records())
    }

    /// Courses whose time slot overlaps the given window.
    pub fn overlapping(&self, from: NaiveTime, to: NaiveTime) -> Result<Vec<Course>, Error> {
        let filter = Filter::lte("start_time", to).and(Filter::gte("end_time", from));

        Ok(self.store.load().filter(filter).execute()?.records())
    }

    /// Multi-criteria search; absent inputs are ignored.
    pub fn search(
        &self,
        name: Option<&str>,
        class_id: Option<&str>,
        teacher_id: Option<u64>,
        week_day: Option<u8>,
    ) -> Result<Vec<Course>, Error> {
        let filter = Criteria::new()
            .contains("name", name)
            .exact("class_id", class_id)
            .exact("teacher_id", teacher_id)
            .exact("week_day", week_day)
            .compose();

        Ok(self.store.load().filter(filter).execute()?.records())
    }

    pub fn remove(&mut self, id: u64) -> Result<Course, Error> {
        self.store
            .remove(&Key::Uint(id))
            .ok_or_else(|| Error::directory_not_found("course does not exist"))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn course(name: &str, class_id: Option<&str>, teacher_id: u64, week_day: u8, start: NaiveTime, end: NaiveTime) -> Course {
        Course {
            id: 0,
            name: name.to_string(),
            class_id: class_id.map(ToString::to_string),
            teacher_id,
            week_day,
            start_time: start,
            end_time: end,
        }
    }

    fn directory() -> CourseDirectory {
        let mut directory = CourseDirectory::new();
        directory
            .add(course("Databases", Some("class-0001"), 7, 1, time(9, 0), time(10, 30)))
            .unwrap();
        directory
            .add(course("Operating Systems", Some("class-0001"), 8, 1, time(10, 40), time(12, 10)))
            .unwrap();
        directory
            .add(course("Linear Algebra", Some("class-0002"), 7, 3, time(14, 0), time(15, 30)))
            .unwrap();

        directory
    }

    #[test]
    fn add_validates_week_day() {
        let mut directory = directory();
        let err = directory
            .add(course("Bogus", None, 1, 0, time(9, 0), time(10, 0)))
            .unwrap_err();

        assert!(err.message.contains("week day must be 1-7"));
    }

    #[test]
    fn add_validates_time_slot() {
        let mut directory = directory();
        let err = directory
            .add(course("Bogus", None, 1, 2, time(10, 0), time(9, 0)))
            .unwrap_err();

        assert!(err.message.contains("end time"));
    }

    #[test]
    fn finders_by_class_teacher_and_day() {
        let directory = directory();

        assert_eq!(directory.by_class("class-0001").unwrap().len(), 2);
        assert_eq!(directory.by_teacher(7).unwrap().len(), 2);
        assert_eq!(directory.by_class_and_teacher("class-0001", 7).unwrap().len(), 1);
        assert_eq!(directory.by_week_day(3).unwrap().len(), 1);
    }

    #[test]
    fn overlapping_window_matches_in_progress_courses() {
        let directory = directory();

        let morning = directory.overlapping(time(10, 0), time(11, 0)).unwrap();
        let names: Vec<_> = morning.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Databases", "Operating Systems"]);

        assert!(directory.overlapping(time(16, 0), time(17, 0)).unwrap().is_empty());
    }

    #[test]
    fn search_composes_all_four_inputs() {
        let directory = directory();

        assert_eq!(directory.search(None, None, None, None).unwrap().len(), 3);
        assert_eq!(
            directory
                .search(Some("s"), Some("class-0001"), None, Some(1))
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            directory
                .search(None, Some("class-0002"), Some(7), None)
                .unwrap()
                .len(),
            1
        );
    }
}
