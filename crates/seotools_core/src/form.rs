use crate::{FieldValue, RequestValue, TaskRequest};

/// Fields that are always sent as lists, even with a single checked option.
pub const MULTI_VALUED_FIELDS: [&str; 3] = ["selected_bots", "bot_groups", "devices"];

/// Converts form fields, in document order, into a task request.
///
/// Repeated names accumulate into a list in encounter order; names listed in
/// [`MULTI_VALUED_FIELDS`] become lists even when seen once.
pub fn serialize_form<N, V>(pairs: &[(N, V)]) -> TaskRequest
where
    N: AsRef<str>,
    V: AsRef<str>,
{
    let mut request = TaskRequest::new();
    for (name, raw) in pairs {
        let name = name.as_ref();
        let value = FieldValue::coerce(raw.as_ref());
        match request.get_mut(name) {
            Some(slot) => {
                let merged = match std::mem::replace(slot, RequestValue::List(Vec::new())) {
                    RequestValue::Scalar(first) => vec![first, value],
                    RequestValue::List(mut values) => {
                        values.push(value);
                        values
                    }
                };
                *slot = RequestValue::List(merged);
            }
            None => request.insert(name, value),
        }
    }

    for name in MULTI_VALUED_FIELDS {
        let Some(slot) = request.get_mut(name) else {
            continue;
        };
        if let RequestValue::Scalar(single) = slot {
            let single = single.clone();
            *slot = RequestValue::List(vec![single]);
        }
    }

    request
}
