use crate::schema::{STATUS_ACTIVE, Score};
use rosterdb_core::{
    db::{Filter, Key, Store},
    error::Error,
};
use rust_decimal::Decimal;

///
/// ScoreBook
///
/// Accessors see active rows only and keep the original sort contracts:
/// a student's scores come back newest semester first, everything else
/// ascending on the listed key.
///

#[derive(Debug, Default)]
pub struct ScoreBook {
    store: Store<Score>,
    next_id: u64,
}

impl ScoreBook {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: Store::new(),
            next_id: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &Store<Score> {
        &self.store
    }

    /// Record a result; `(student, course, exam type, semester)` must not
    /// already have an active row.
    pub fn record(&mut self, mut score: Score) -> Result<Score, Error> {
        let filter = entry_filter(
            score.student_id,
            score.course_id,
            &score.exam_type,
            &score.semester,
        );
        if self.store.load().filter(filter).exists()? {
            return Err(Error::directory_conflict(
                "a score for this student, course, exam type and semester already exists",
            ));
        }

        self.next_id += 1;
        score.id = self.next_id;
        if score.status == 0 {
            score.status = STATUS_ACTIVE;
        }
        self.store.insert(score.clone());

        Ok(score)
    }

    /// All active scores for one student, newest semester first.
    pub fn for_student(&self, student_id: u64) -> Result<Vec<Score>, Error> {
        Ok(self
            .active()
            .filter(Filter::eq("student_id", student_id))
            .order_by_desc("semester")
            .execute()?
            .records())
    }

    /// All active scores in one semester, by student ascending.
    pub fn for_semester(&self, semester: &str) -> Result<Vec<Score>, Error> {
        Ok(self
            .active()
            .filter(Filter::eq("semester", semester))
            .order_by("student_id")
            .execute()?
            .records())
    }

    /// One student's active scores in one semester, by course ascending.
    pub fn for_student_semester(
        &self,
        student_id: u64,
        semester: &str,
    ) -> Result<Vec<Score>, Error> {
        let filter = Filter::eq("student_id", student_id).and(Filter::eq("semester", semester));

        Ok(self
            .active()
            .filter(filter)
            .order_by("course_id")
            .execute()?
            .records())
    }

    /// All active scores for one course, by student ascending.
    pub fn for_course(&self, course_id: u64) -> Result<Vec<Score>, Error> {
        Ok(self
            .active()
            .filter(Filter::eq("course_id", course_id))
            .order_by("student_id")
            .execute()?
            .records())
    }

    /// One course's active scores in one semester, by student ascending.
    pub fn for_course_semester(&self, course_id: u64, semester: &str) -> Result<Vec<Score>, Error> {
        let filter = Filter::eq("course_id", course_id).and(Filter::eq("semester", semester));

        Ok(self
            .active()
            .filter(filter)
            .order_by("student_id")
            .execute()?
            .records())
    }

    /// The unique active entry for a student/course/exam-type/semester.
    pub fn find_entry(
        &self,
        student_id: u64,
        course_id: u64,
        exam_type: &str,
        semester: &str,
    ) -> Result<Score, Error> {
        let filter = entry_filter(student_id, course_id, exam_type, semester);

        self.store
            .load()
            .filter(filter)
            .execute()?
            .one_opt_record()?
            .ok_or_else(|| {
                Error::directory_not_found(format!(
                    "no score for student {student_id}, course {course_id}, {exam_type}, {semester}"
                ))
            })
    }

    /// Mean active score for a student in one semester.
    pub fn student_average(
        &self,
        student_id: u64,
        semester: &str,
    ) -> Result<Option<Decimal>, Error> {
        let filter = Filter::eq("student_id", student_id).and(Filter::eq("semester", semester));

        self.active().filter(filter).avg_by("score")
    }

    /// Mean active score for a course in one semester.
    pub fn course_average(&self, course_id: u64, semester: &str) -> Result<Option<Decimal>, Error> {
        let filter = Filter::eq("course_id", course_id).and(Filter::eq("semester", semester));

        self.active().filter(filter).avg_by("score")
    }

    pub fn remove(&mut self, id: u64) -> Result<Score, Error> {
        self.store
            .remove(&Key::Uint(id))
            .ok_or_else(|| Error::directory_not_found("score does not exist"))
    }

    fn active(&self) -> rosterdb_core::db::LoadQuery<'_, Score> {
        self.store.load().filter(Filter::eq("status", STATUS_ACTIVE))
    }
}

fn entry_filter(student_id: u64, course_id: u64, exam_type: &str, semester: &str) -> Filter {
    Filter::eq("student_id", student_id)
        .and(Filter::eq("course_id", course_id))
        .and(Filter::eq("exam_type", exam_type))
        .and(Filter::eq("semester", semester))
        .and(Filter::eq("status", STATUS_ACTIVE))
}

///
/// TESTS
///
