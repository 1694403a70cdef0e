use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use tracing::debug;

use super::calendar::push_event;
use super::{IdKind, Workspace};
use crate::error::AppError;
use crate::models::calendar::{CalendarEvent, Recurrence};
use crate::models::class::{
    Announcement, Assignment, Class, DEFAULT_CLASS_COLOR, DEFAULT_CLASS_ICON, DEFAULT_CREDITS,
    DEFAULT_POINTS, DEFAULT_TERM, NewAnnouncementRequest, NewAssignmentRequest, NewClassRequest,
    NewResourceRequest, Resource, UpdateAssignmentRequest, UpdateClassRequest,
};
use crate::services::syllabus::{self, ParsedSyllabus};

const DEFAULT_START_TIME: &str = "09:00";
const DEFAULT_END_TIME: &str = "09:50";
const CLASS_REMINDER_MINUTES: i64 = 30;
const DEADLINE_REMINDER_MINUTES: i64 = 1440;

fn fetch_class_mut<'a>(ws: &'a mut Workspace, id: &str) -> Option<&'a mut Class> {
    ws.classes.iter_mut().find(|c| c.id == id)
}

pub fn fetch_class<'a>(ws: &'a Workspace, id: &str) -> Option<&'a Class> {
    ws.classes.iter().find(|c| c.id == id)
}

pub fn fetch_classes(ws: &Workspace, term: Option<&str>) -> Vec<Class> {
    ws.classes
        .iter()
        .filter(|c| term.is_none_or(|t| c.term == t))
        .cloned()
        .collect()
}

pub fn class_events(ws: &Workspace, class_id: &str) -> Vec<CalendarEvent> {
    ws.events
        .iter()
        .filter(|e| e.class_id.as_deref() == Some(class_id))
        .cloned()
        .collect()
}

fn parse_weekday(day: &str) -> Weekday {
    day.trim().parse::<Weekday>().unwrap_or(Weekday::Mon)
}

/// The first date strictly after `today` that falls on `weekday`.
pub fn next_occurrence(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut ahead = weekday.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64;
    if ahead <= 0 {
        ahead += 7;
    }
    today + Duration::days(ahead)
}

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// One weekly event per schedule day, placed on its next occurrence.
fn create_schedule_events(ws: &mut Workspace, class: &Class, today: NaiveDate) -> usize {
    let schedule = &class.schedule;
    let start_time = or_default(&schedule.start_time, DEFAULT_START_TIME);
    let end_time = or_default(&schedule.end_time, DEFAULT_END_TIME);
    let instructor = or_default(&class.instructor.name, "TBA");

    for day in &schedule.days {
        let date = next_occurrence(today, parse_weekday(day)).format("%Y-%m-%d");
        let mut event = CalendarEvent::new(
            ws.next_id(IdKind::Event),
            format!("📚 {}: {}", class.code, class.name),
            format!("{}T{}:00", date, start_time),
        );
        event.description = format!("Instructor: {}", instructor);
        event.end = Some(format!("{}T{}:00", date, end_time));
        event.color = class.color.clone();
        event.kind = "class".to_string();
        event.class_id = Some(class.id.clone());
        event.recurrence = Some(Recurrence {
            frequency: "weekly".to_string(),
            days: vec![day.clone()],
        });
        event.reminder = CLASS_REMINDER_MINUTES;
        event.location = Some(schedule.location.clone());
        push_event(ws, event);
    }
    schedule.days.len()
}

pub fn insert_class(ws: &mut Workspace, req: NewClassRequest, today: NaiveDate) -> Class {
    let class = Class {
        id: ws.next_id(IdKind::Class),
        name: req.name.unwrap_or_else(|| "Untitled Class".to_string()),
        code: req.code.unwrap_or_default(),
        color: req.color.unwrap_or_else(|| DEFAULT_CLASS_COLOR.to_string()),
        icon: req.icon.unwrap_or_else(|| DEFAULT_CLASS_ICON.to_string()),
        instructor: req.instructor.unwrap_or_default(),
        schedule: req.schedule.unwrap_or_default(),
        syllabus: None,
        syllabus_parsed: false,
        grade: None,
        credits: req.credits.unwrap_or(DEFAULT_CREDITS),
        term: req.term.unwrap_or_else(|| DEFAULT_TERM.to_string()),
        description: req.description.unwrap_or_default(),
        resources: Vec::new(),
        announcements: Vec::new(),
        assignments: Vec::new(),
        created_at: Utc::now(),
        updated_at: None,
    };
    ws.classes.push(class.clone());

    let created = create_schedule_events(ws, &class, today);
    debug!("class {} scheduled on {} days", class.id, created);
    class
}

pub fn update_class(ws: &mut Workspace, id: &str, req: UpdateClassRequest) -> Option<Class> {
    let class = fetch_class_mut(ws, id)?;
    if let Some(name) = req.name {
        class.name = name;
    }
    if let Some(code) = req.code {
        class.code = code;
    }
    if let Some(color) = req.color {
        class.color = color;
    }
    if let Some(icon) = req.icon {
        class.icon = icon;
    }
    if let Some(instructor) = req.instructor {
        class.instructor = instructor;
    }
    if let Some(schedule) = req.schedule {
        class.schedule = schedule;
    }
    if let Some(grade) = req.grade {
        class.grade = grade;
    }
    if let Some(credits) = req.credits {
        class.credits = credits;
    }
    if let Some(term) = req.term {
        class.term = term;
    }
    if let Some(description) = req.description {
        class.description = description;
    }
    class.updated_at = Some(Utc::now());
    Some(class.clone())
}

/// Deletes the class together with every calendar event tied to it.
pub fn delete_class(ws: &mut Workspace, id: &str) -> bool {
    let Some(idx) = ws.classes.iter().position(|c| c.id == id) else {
        return false;
    };
    ws.classes.remove(idx);
    ws.events.retain(|e| e.class_id.as_deref() != Some(id));
    true
}

fn assignment_color(kind: &str, class_color: &str) -> String {
    match kind {
        "homework" => "#2383e2",
        "quiz" => "#d9730d",
        "exam" => "#e03e3e",
        "project" => "#6940a5",
        "paper" => "#0f7b6c",
        "lab" => "#dfab01",
        _ => class_color,
    }
    .to_string()
}

fn create_assignment_event(ws: &mut Workspace, assignment: &Assignment, class: &Class) {
    let Some(due) = assignment.due_date.clone() else {
        return;
    };
    let mut event = CalendarEvent::new(
        ws.next_id(IdKind::Event),
        format!("📝 {}", assignment.title),
        due.clone(),
    );
    event.description = format!("{}: {}", class.code, assignment.description);
    event.all_day = due.contains("T23:59");
    event.end = Some(due);
    event.color = assignment_color(&assignment.kind, &class.color);
    event.kind = "assignment".to_string();
    event.class_id = Some(class.id.clone());
    event.assignment_id = Some(assignment.id.clone());
    event.reminder = DEADLINE_REMINDER_MINUTES;
    push_event(ws, event);
}

pub fn insert_assignment(
    ws: &mut Workspace,
    class_id: &str,
    req: NewAssignmentRequest,
) -> Option<Assignment> {
    let class = fetch_class(ws, class_id)?.clone();
    let assignment = Assignment {
        id: ws.next_id(IdKind::Assignment),
        title: req.title.unwrap_or_else(|| "Untitled Assignment".to_string()),
        description: req.description.unwrap_or_default(),
        kind: req.kind.unwrap_or_else(|| "homework".to_string()),
        due_date: req.due_date.filter(|d| !d.trim().is_empty()),
        points: req.points.unwrap_or(DEFAULT_POINTS),
        weight: req.weight,
        completed: false,
        grade: None,
        notes: String::new(),
        attachments: Vec::new(),
        created_at: Utc::now(),
    };

    fetch_class_mut(ws, class_id)?
        .assignments
        .push(assignment.clone());
    create_assignment_event(ws, &assignment, &class);
    Some(assignment)
}

/// Applies the update and keeps the assignment's calendar event in step
/// with its title and due date.
pub fn update_assignment(
    ws: &mut Workspace,
    class_id: &str,
    assignment_id: &str,
    req: UpdateAssignmentRequest,
) -> Result<Assignment, AppError> {
    let class = fetch_class_mut(ws, class_id).ok_or_else(|| AppError::not_found("Class"))?;
    let assignment = class
        .assignments
        .iter_mut()
        .find(|a| a.id == assignment_id)
        .ok_or_else(|| AppError::not_found("Assignment"))?;

    if let Some(title) = req.title {
        assignment.title = title;
    }
    if let Some(description) = req.description {
        assignment.description = description;
    }
    if let Some(kind) = req.kind {
        assignment.kind = kind;
    }
    if let Some(due_date) = req.due_date {
        assignment.due_date = due_date;
    }
    if let Some(points) = req.points {
        assignment.points = points;
    }
    if let Some(weight) = req.weight {
        assignment.weight = weight;
    }
    if let Some(completed) = req.completed {
        assignment.completed = completed;
    }
    if let Some(grade) = req.grade {
        assignment.grade = grade;
    }
    if let Some(notes) = req.notes {
        assignment.notes = notes;
    }
    let updated = assignment.clone();
    let class = class.clone();

    let linked = ws
        .events
        .iter()
        .position(|e| e.assignment_id.as_deref() == Some(assignment_id));
    match (linked, updated.due_date.clone()) {
        (Some(idx), Some(due)) => {
            let event = &mut ws.events[idx];
            event.title = format!("📝 {}", updated.title);
            event.all_day = due.contains("T23:59");
            event.start = due.clone();
            event.end = Some(due);
            event.updated_at = Some(Utc::now());
        }
        (Some(idx), None) => {
            ws.events.remove(idx);
        }
        (None, Some(_)) => create_assignment_event(ws, &updated, &class),
        (None, None) => {}
    }

    Ok(updated)
}

pub fn insert_resource(ws: &mut Workspace, class_id: &str, req: NewResourceRequest) -> Option<Resource> {
    let class = fetch_class_mut(ws, class_id)?;
    let resource = Resource {
        id: format!("r{}", class.resources.len()),
        title: req.title,
        kind: req.kind.unwrap_or_else(|| "link".to_string()),
        url: req.url,
        page_id: req.page_id,
        created_at: Utc::now(),
    };
    class.resources.push(resource.clone());
    Some(resource)
}

/// Announcements are kept newest first.
pub fn insert_announcement(
    ws: &mut Workspace,
    class_id: &str,
    req: NewAnnouncementRequest,
) -> Option<Announcement> {
    let class = fetch_class_mut(ws, class_id)?;
    let announcement = Announcement {
        id: format!("ann{}", class.announcements.len()),
        title: req.title,
        content: req.content,
        important: req.important,
        created_at: Utc::now(),
    };
    class.announcements.insert(0, announcement.clone());
    Some(announcement)
}

/// Stores the syllabus text on the class and adds everything parsed from it.
/// Extracted instructor details replace the stored ones, blanks included.
pub fn apply_syllabus(ws: &mut Workspace, class_id: &str, text: String) -> Option<ParsedSyllabus> {
    let parsed = syllabus::parse(&text);

    let class = fetch_class_mut(ws, class_id)?;
    class.syllabus = Some(text);
    class.syllabus_parsed = true;
    if let Some(found) = &parsed.instructor {
        class.instructor = found.clone();
    }
    class.updated_at = Some(Utc::now());
    let class = class.clone();

    for draft in parsed.assignments.iter().cloned() {
        insert_assignment(ws, class_id, draft);
    }

    for item in &parsed.events {
        let mut event = CalendarEvent::new(
            ws.next_id(IdKind::Event),
            format!("{}: {}", class.code, item.title),
            item.start,
        );
        event.end = Some(item.end.to_string());
        event.all_day = item.all_day;
        event.color = item.color.to_string();
        event.kind = item.kind.to_string();
        event.class_id = Some(class.id.clone());
        event.reminder = DEADLINE_REMINDER_MINUTES;
        push_event(ws, event);
    }

    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class::Schedule;

    fn today() -> NaiveDate {
        // A Wednesday.
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn class_with_days(ws: &mut Workspace, days: &[&str]) -> Class {
        insert_class(
            ws,
            NewClassRequest {
                name: Some("Algorithms".into()),
                code: Some("CS 161".into()),
                schedule: Some(Schedule {
                    days: days.iter().map(|d| d.to_string()).collect(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            today(),
        )
    }

    #[test]
    fn next_occurrence_is_strictly_after_today() {
        assert_eq!(next_occurrence(today(), Weekday::Wed).to_string(), "2024-05-22");
        assert_eq!(next_occurrence(today(), Weekday::Thu).to_string(), "2024-05-16");
        assert_eq!(next_occurrence(today(), Weekday::Mon).to_string(), "2024-05-20");
    }

    #[test]
    fn schedule_days_become_weekly_events() {
        let mut ws = Workspace::default();
        let class = class_with_days(&mut ws, &["monday", "Thursday"]);
        assert_eq!(class.term, "Spring 2024");
        assert_eq!(ws.events.len(), 2);

        let first = &ws.events[0];
        assert_eq!(first.title, "📚 CS 161: Algorithms");
        assert_eq!(first.start, "2024-05-20T09:00:00");
        assert_eq!(first.end.as_deref(), Some("2024-05-20T09:50:00"));
        assert_eq!(first.description, "Instructor: TBA");
        assert_eq!(first.reminder, 30);
        assert_eq!(ws.events[1].start, "2024-05-16T09:00:00");
    }

    #[test]
    fn deleting_class_cascades_to_events() {
        let mut ws = Workspace::default();
        let keep = class_with_days(&mut ws, &["friday"]);
        let gone = class_with_days(&mut ws, &["monday", "tuesday"]);
        assert!(delete_class(&mut ws, &gone.id));
        assert_eq!(ws.events.len(), 1);
        assert_eq!(ws.events[0].class_id.as_deref(), Some(keep.id.as_str()));
        assert!(!delete_class(&mut ws, &gone.id));
    }

    #[test]
    fn assignment_event_follows_updates() {
        let mut ws = Workspace::default();
        let class = class_with_days(&mut ws, &[]);
        let assignment = insert_assignment(
            &mut ws,
            &class.id,
            NewAssignmentRequest {
                title: Some("Lab 1".into()),
                kind: Some("lab".into()),
                due_date: Some("2024-06-01T23:59:00".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(assignment.points, 100);
        assert_eq!(ws.events.len(), 1);
        assert_eq!(ws.events[0].color, "#dfab01");
        assert!(ws.events[0].all_day);

        update_assignment(
            &mut ws,
            &class.id,
            &assignment.id,
            UpdateAssignmentRequest {
                title: Some("Lab 1 (revised)".into()),
                due_date: Some(Some("2024-06-03T10:00:00".into())),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(ws.events[0].title, "📝 Lab 1 (revised)");
        assert_eq!(ws.events[0].start, "2024-06-03T10:00:00");
        assert!(!ws.events[0].all_day);
    }

    #[test]
    fn syllabus_replaces_instructor_details() {
        let mut ws = Workspace::default();
        let class = insert_class(
            &mut ws,
            NewClassRequest {
                code: Some("CS 101".into()),
                instructor: Some(crate::models::Instructor {
                    office: "Gates 1".into(),
                    ..Default::default()
                }),
                ..Default::default()
            },
            today(),
        );

        let parsed = apply_syllabus(
            &mut ws,
            &class.id,
            "Instructor: Dr. Lin\nContact lin@uni.edu".into(),
        )
        .unwrap();
        assert_eq!(parsed.assignments.len(), 8);

        let stored = fetch_class(&ws, &class.id).unwrap();
        assert!(stored.syllabus_parsed);
        assert_eq!(stored.instructor.name, "Dr. Lin");
        assert_eq!(stored.instructor.email, "lin@uni.edu");
        assert_eq!(stored.instructor.office, "");
        assert_eq!(stored.assignments.len(), 8);
        // 8 assignment deadlines plus 3 course dates.
        assert_eq!(class_events(&ws, &class.id).len(), 11);
        assert!(ws.events.iter().any(|e| e.title == "CS 101: Review Session"));
    }

    #[test]
    fn announcements_are_prepended() {
        let mut ws = Workspace::default();
        let class = class_with_days(&mut ws, &[]);
        for title in ["first", "second"] {
            insert_announcement(&mut ws, &class.id, NewAnnouncementRequest {
                title: title.into(),
                ..Default::default()
            });
        }
        let stored = fetch_class(&ws, &class.id).unwrap();
        assert_eq!(stored.announcements[0].title, "second");
        assert_eq!(stored.announcements[0].id, "ann1");
    }
}
