use chrono::{Datelike, Duration, NaiveDate, TimeDelta, Utc};

use super::{IdKind, Workspace};
use crate::error::AppError;
use crate::models::calendar::{
    CalendarEvent, EventQuery, NewEventRequest, UpdateEventRequest,
};

pub fn fetch_events(ws: &Workspace, query: &EventQuery) -> Vec<CalendarEvent> {
    ws.events
        .iter()
        .filter(|e| query.start.as_deref().is_none_or(|start| e.start.as_str() >= start))
        .filter(|e| query.end.as_deref().is_none_or(|end| e.start.as_str() <= end))
        .filter(|e| {
            query
                .class_id
                .as_deref()
                .is_none_or(|class_id| e.class_id.as_deref() == Some(class_id))
        })
        .filter(|e| query.kind.as_deref().is_none_or(|kind| e.kind == kind))
        .cloned()
        .collect()
}

pub fn fetch_event<'a>(ws: &'a Workspace, id: &str) -> Option<&'a CalendarEvent> {
    ws.events.iter().find(|e| e.id == id)
}

pub fn insert_event(ws: &mut Workspace, req: NewEventRequest) -> Result<CalendarEvent, AppError> {
    let start = req
        .start
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Event start is required".to_string()))?;

    let mut event = CalendarEvent::new(
        ws.next_id(IdKind::Event),
        req.title.unwrap_or_else(|| "Untitled Event".to_string()),
        start,
    );
    event.description = req.description.unwrap_or_default();
    event.end = req.end;
    event.all_day = req.all_day.unwrap_or(false);
    if let Some(color) = req.color {
        event.color = color;
    }
    if let Some(kind) = req.kind {
        event.kind = kind;
    }
    event.class_id = req.class_id;
    event.recurrence = req.recurrence;
    if let Some(reminder) = req.reminder {
        event.reminder = reminder;
    }
    event.location = req.location;
    event.attendees = req.attendees.unwrap_or_default();

    Ok(push_event(ws, event))
}

pub(crate) fn push_event(ws: &mut Workspace, event: CalendarEvent) -> CalendarEvent {
    ws.events.push(event.clone());
    event
}

pub fn update_event(ws: &mut Workspace, id: &str, req: UpdateEventRequest) -> Option<CalendarEvent> {
    let event = ws.events.iter_mut().find(|e| e.id == id)?;

    if let Some(title) = req.title {
        event.title = title;
    }
    if let Some(description) = req.description {
        event.description = description;
    }
    if let Some(start) = req.start {
        event.start = start;
    }
    if let Some(end) = req.end {
        event.end = end;
    }
    if let Some(all_day) = req.all_day {
        event.all_day = all_day;
    }
    if let Some(color) = req.color {
        event.color = color;
    }
    if let Some(kind) = req.kind {
        event.kind = kind;
    }
    if let Some(class_id) = req.class_id {
        event.class_id = class_id;
    }
    if let Some(recurrence) = req.recurrence {
        event.recurrence = recurrence;
    }
    if let Some(reminder) = req.reminder {
        event.reminder = reminder;
    }
    if let Some(location) = req.location {
        event.location = location;
    }
    if let Some(attendees) = req.attendees {
        event.attendees = attendees;
    }

    event.updated_at = Some(Utc::now());
    Some(event.clone())
}

pub fn delete_event(ws: &mut Workspace, id: &str) -> bool {
    let before = ws.events.len();
    ws.events.retain(|e| e.id != id);
    ws.events.len() != before
}

/// Events whose start falls on `date` (`YYYY-MM-DD`).
pub fn events_on(ws: &Workspace, date: &str) -> Vec<CalendarEvent> {
    ws.events
        .iter()
        .filter(|e| e.start.starts_with(date))
        .cloned()
        .collect()
}

/// Events starting at or after `now`, soonest first.
pub fn upcoming_events(ws: &Workspace, now: &str, limit: usize) -> Vec<CalendarEvent> {
    let mut events: Vec<_> = ws
        .events
        .iter()
        .filter(|e| e.start.as_str() >= now)
        .cloned()
        .collect();
    events.sort_by(|a, b| a.start.cmp(&b.start));
    events.truncate(limit);
    events
}

/// Events whose start date lies within `[from, to]`, both `YYYY-MM-DD`.
pub fn events_between(ws: &Workspace, from: &str, to: &str) -> Vec<CalendarEvent> {
    ws.events
        .iter()
        .filter(|e| {
            let day = e.start_date();
            from <= day && day <= to
        })
        .cloned()
        .collect()
}

/// Monday and Sunday of the week containing `today`, shifted by `offset`
/// weeks. `None` when the shifted week falls outside the supported dates.
pub fn week_bounds(today: NaiveDate, offset: i64) -> Option<(NaiveDate, NaiveDate)> {
    let monday = today
        .checked_sub_signed(Duration::days(today.weekday().num_days_from_monday() as i64))?
        .checked_add_signed(TimeDelta::try_weeks(offset)?)?;
    Some((monday, monday.checked_add_signed(Duration::days(6))?))
}
