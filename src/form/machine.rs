use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    form::{
        error::FormError,
        value_model::{FieldKey, FieldValue, FormValues, GroupValues, TouchedSet},
    },
    persist::gateway::{DEFAULT_SNAPSHOT_KEY, PersistenceGateway},
    render::{
        group::{RenderedGroup, render_group},
        input::coerce,
        view::{FormView, navigation_state, render_sidebar},
    },
    schema::{
        error::SchemaError,
        field_model::Field,
        normalize::{normalize_group, normalize_groups},
        schema_model::{FormSchema, Group, RawGroup},
    },
    trace::{logger::TraceLogger, trace::TraceEvent},
    validate::validator::{ValidationError, validate_group},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormPhase {
    Editing,
    /// Terminal: reached once the last group validates and is saved.
    Submitted,
}

/// Result of a `next()` attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Advanced { from: usize, to: usize },
    Submitted,
    /// Validation failed; every failing field of the active group is listed.
    Blocked { errors: Vec<ValidationError> },
    AlreadySubmitted,
}

impl Navigation {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Navigation::Blocked { .. })
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Navigation::Blocked { errors } => errors,
            _ => &[],
        }
    }
}

/// Owns the form's groups, values, touched set and navigation.
///
/// All mutation goes through the methods below; everything else only gets
/// shared references or rendered descriptions.
pub struct FormMachine {
    title: String,
    description: Option<String>,
    groups: Vec<Group>,
    active_index: usize,
    values: FormValues,
    touched: TouchedSet,
    phase: FormPhase,

    gateway: PersistenceGateway,
    snapshot_key: String,
    warning: Option<String>,

    tracer: TraceLogger,
    fingerprint: String,
    step: u64,
}

impl FormMachine {
    pub fn new(schema: FormSchema, gateway: PersistenceGateway) -> Result<FormMachine, FormError> {
        let fingerprint = schema.fingerprint();
        let groups = normalize_groups(schema.groups.into_iter().map(RawGroup::from).collect())?;
        if groups.is_empty() {
            return Err(SchemaError::NoGroups.into());
        }

        let values = groups
            .iter()
            .map(|g| (g.title.clone(), GroupValues::new()))
            .collect();

        Ok(FormMachine {
            title: schema.title,
            description: schema.description,
            groups,
            active_index: 0,
            values,
            touched: TouchedSet::new(),
            phase: FormPhase::Editing,
            gateway,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            warning: None,
            tracer: TraceLogger::disabled(),
            fingerprint,
            step: 0,
        })
    }

    /// Build a machine and restore the last saved snapshot, if any.
    pub fn resume(schema: FormSchema, gateway: PersistenceGateway) -> Result<FormMachine, FormError> {
        let mut machine = FormMachine::new(schema, gateway)?;
        machine.restore()?;
        Ok(machine)
    }

    pub fn with_snapshot_key(mut self, key: &str) -> Self {
        self.snapshot_key = key.to_string();
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    // ------------------------------------------------------------------
    // Read views
    // ------------------------------------------------------------------

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The schema as it stands now, including groups added at runtime.
    pub fn schema(&self) -> FormSchema {
        FormSchema {
            title: self.title.clone(),
            description: self.description.clone(),
            groups: self.groups.clone(),
        }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_group(&self) -> &Group {
        &self.groups[self.active_index]
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == FormPhase::Submitted
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn group_values(&self, group: &str) -> Option<&GroupValues> {
        self.values.get(group)
    }

    pub fn value(&self, group: &str, field: &str) -> Option<&FieldValue> {
        self.values.get(group).and_then(|v| v.get(field))
    }

    pub fn touched(&self) -> &TouchedSet {
        &self.touched
    }

    pub fn is_touched(&self, group: &str, field: &str) -> bool {
        self.touched.contains(&FieldKey::new(group, field))
    }

    pub fn snapshot_key(&self) -> &str {
        &self.snapshot_key
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Last persistence problem, cleared by the next successful save.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Current validation failures of a group, regardless of touched state.
    pub fn errors(&self, group: &str) -> Result<Vec<ValidationError>, FormError> {
        let g = self.group(group)?;
        Ok(validate_group(g, self.values.get(group)))
    }

    pub fn render_group(&self, group: &str) -> Result<RenderedGroup, FormError> {
        let g = self.group(group)?;
        Ok(render_group(g, self.values.get(group), &self.touched))
    }

    pub fn view(&self) -> FormView {
        let active = self.active_group();
        FormView {
            title: self.title.clone(),
            description: self.description.clone(),
            sidebar: render_sidebar(&self.groups, self.active_index),
            active: render_group(active, self.values.get(&active.title), &self.touched),
            navigation: navigation_state(self.active_index, self.groups.len(), self.is_submitted()),
            warning: self.warning.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Store a typed value. Legal in every phase; touched state is untouched.
    pub fn set_value(&mut self, group: &str, field: &str, value: FieldValue) -> Result<(), FormError> {
        let target = self.field(group, field)?;
        if !value.fits(&target.kind) {
            return Err(FormError::ValueShape {
                group: group.to_string(),
                field: field.to_string(),
                type_name: target.kind.type_name().to_string(),
            });
        }

        self.values
            .entry(group.to_string())
            .or_default()
            .insert(field.to_string(), value);

        self.trace("set_value", |t| t.with_outcome(format!("{}/{}", group, field)));
        Ok(())
    }

    /// Apply a raw UI change event: coerce against the current value, then store.
    pub fn input(&mut self, group: &str, field: &str, raw: &str) -> Result<(), FormError> {
        let target = self.field(group, field)?;
        let value = coerce(target, self.value(group, field), raw)?;
        self.set_value(group, field, value)
    }

    pub fn blur(&mut self, group: &str, field: &str) -> Result<(), FormError> {
        self.field(group, field)?;
        self.touched.insert(FieldKey::new(group, field));
        self.trace("blur", |t| t.with_outcome(format!("{}/{}", group, field)));
        Ok(())
    }

    /// Validate the active group, snapshot, then advance or submit.
    ///
    /// Every field of the active group is marked touched whatever the
    /// outcome. A failed save leaves the machine on the same group and
    /// returns the error; entered values are kept.
    pub fn next(&mut self) -> Result<Navigation, FormError> {
        if self.is_submitted() {
            self.trace("next", |t| t.with_outcome("already_submitted"));
            return Ok(Navigation::AlreadySubmitted);
        }

        let active = &self.groups[self.active_index];
        for field in &active.fields {
            self.touched.insert(FieldKey::new(&active.title, &field.name));
        }

        let errors = validate_group(active, self.values.get(&active.title));
        if !errors.is_empty() {
            self.trace("next", |t| t.with_outcome("blocked").with_errors(&errors));
            return Ok(Navigation::Blocked { errors });
        }

        if let Err(e) = self.gateway.save(&self.snapshot_key, &self.values) {
            self.warning = Some(e.to_string());
            let err = FormError::Persistence(e);
            self.trace("next", |t| t.with_outcome("save_failed").with_error(&err));
            return Err(err);
        }
        self.warning = None;

        let from = self.active_index;
        let navigation = if from + 1 < self.groups.len() {
            self.active_index = from + 1;
            Navigation::Advanced { from, to: from + 1 }
        } else {
            self.phase = FormPhase::Submitted;
            Navigation::Submitted
        };

        self.trace("next", |t| t.with_outcome(format!("{:?}", navigation)));
        Ok(navigation)
    }

    /// Sidebar jump: no validation gate.
    pub fn go_to_group(&mut self, title: &str) -> Result<(), FormError> {
        if self.is_submitted() {
            return Err(FormError::Submitted);
        }
        let index = self
            .groups
            .iter()
            .position(|g| g.title == title)
            .ok_or_else(|| FormError::UnknownGroup(title.to_string()))?;

        self.active_index = index;
        self.trace("go_to", |t| t.with_outcome(title));
        Ok(())
    }

    /// Append a group. Titles stay unique; the new group starts with an
    /// empty value map.
    pub fn add_group(&mut self, group: Group) -> Result<(), FormError> {
        let group = normalize_group(RawGroup::from(group))?;
        if self.groups.iter().any(|g| g.title == group.title) {
            return Err(SchemaError::DuplicateGroup(group.title).into());
        }

        self.values.entry(group.title.clone()).or_default();
        let title = group.title.clone();
        self.groups.push(group);

        self.trace("add_group", |t| t.with_outcome(&title));
        Ok(())
    }

    /// Reload values from the store. Unknown groups/fields and values of
    /// the wrong shape are dropped. Returns whether a snapshot existed.
    pub fn restore(&mut self) -> Result<bool, FormError> {
        let stored: Option<BTreeMap<String, BTreeMap<String, serde_json::Value>>> =
            self.gateway.load_as(&self.snapshot_key)?;
        let Some(stored) = stored else {
            self.trace("restore", |t| t.with_outcome("empty"));
            return Ok(false);
        };

        for group in &self.groups {
            let Some(saved) = stored.get(&group.title) else {
                continue;
            };
            let entry = self.values.entry(group.title.clone()).or_default();
            for field in &group.fields {
                let value = saved
                    .get(&field.name)
                    .and_then(|v| serde_json::from_value::<FieldValue>(v.clone()).ok())
                    .filter(|v| v.fits(&field.kind));
                if let Some(value) = value {
                    entry.insert(field.name.clone(), value);
                }
            }
        }

        self.trace("restore", |t| t.with_outcome("restored"));
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn group(&self, title: &str) -> Result<&Group, FormError> {
        self.groups
            .iter()
            .find(|g| g.title == title)
            .ok_or_else(|| FormError::UnknownGroup(title.to_string()))
    }

    fn field(&self, group: &str, name: &str) -> Result<&Field, FormError> {
        self.group(group)?.field(name).ok_or_else(|| FormError::UnknownField {
            group: group.to_string(),
            field: name.to_string(),
        })
    }

    fn trace(&mut self, event: &str, build: impl FnOnce(TraceEvent) -> TraceEvent) {
        let step = self.step;
        self.step += 1;
        if !self.tracer.is_enabled() {
            return;
        }
        let base = TraceEvent::now(step, self.phase, &self.groups[self.active_index].title, event)
            .with_schema(&self.fingerprint);
        self.tracer.log(&build(base));
    }
}

impl std::fmt::Debug for FormMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormMachine")
            .field("title", &self.title)
            .field("groups", &self.groups.len())
            .field("active_index", &self.active_index)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
