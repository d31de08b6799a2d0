//! Guards access to call recordings.

use crate::call::Call;
use crate::directory::User;
use crate::errors::CallCenterError;

/// What the caller wants to do with a recording.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Intent {
    /// Only learn where the recording is.
    View,
    /// Download the recording itself.
    Download,
}

impl Intent {
    /// Reads the `download` query parameter. Only the exact value `true`
    /// asks for a download.
    pub fn from_download_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("true") => Intent::Download,
            _ => Intent::View,
        }
    }
}

/// Whether `identity` may download the recording of `call`.
pub fn can_download_recording(identity: Option<&User>, _call: &Call) -> bool {
    identity.map_or(false, |user| user.role.may_download_recordings())
}

/// Returns the recording URL of `call` if `identity` may have it for the
/// given intent.
pub fn authorize_recording<'a>(
    identity: Option<&User>,
    call: &'a Call,
    intent: Intent,
) -> Result<&'a str, CallCenterError> {
    let url = call
        .recording_url()
        .ok_or(CallCenterError::NoRecording(call.id()))?;

    match intent {
        Intent::View => Ok(url),
        Intent::Download if can_download_recording(identity, call) => Ok(url),
        Intent::Download => Err(CallCenterError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::call::{NewCall, TelephonyUpdate};
    use crate::directory::{Directory, Role};

    const URL: &str = "https://records.example.com/7.ogg";

    fn call(recording_url: Option<&str>) -> Call {
        let mut call = Call::new(7, datetime!(2024-05-01 10:00 UTC), NewCall::default());
        call.apply(TelephonyUpdate {
            recording_url: recording_url.map(str::to_owned),
            ..Default::default()
        });
        call
    }

    fn identities() -> Vec<Option<User>> {
        let directory = Directory::default();
        let mut identities = directory.users().iter().cloned().map(Some).collect::<Vec<_>>();
        identities.push(None);
        identities
    }

    #[test]
    fn missing_recording_is_not_found_for_everyone() {
        let call = call(None);

        for identity in identities() {
            for intent in &[Intent::View, Intent::Download] {
                assert!(matches!(
                    authorize_recording(identity.as_ref(), &call, *intent),
                    Err(CallCenterError::NoRecording(7))
                ));
            }
        }
    }

    #[test]
    fn viewing_is_open_to_everyone() {
        let call = call(Some(URL));

        for identity in identities() {
            assert_eq!(
                authorize_recording(identity.as_ref(), &call, Intent::View).unwrap(),
                URL
            );
        }
    }

    #[test]
    fn downloading_depends_on_role() {
        let call = call(Some(URL));

        for identity in identities() {
            let result = authorize_recording(identity.as_ref(), &call, Intent::Download);

            match identity.map(|user| user.role) {
                Some(Role::Supervisor) | Some(Role::Admin) => assert_eq!(result.unwrap(), URL),
                Some(Role::Operator) | None => {
                    assert!(matches!(result, Err(CallCenterError::Forbidden)))
                }
            }
        }
    }

    #[test]
    fn download_flag_must_be_exactly_true() {
        assert_eq!(Intent::from_download_flag(Some("true")), Intent::Download);
        assert_eq!(Intent::from_download_flag(Some("TRUE")), Intent::View);
        assert_eq!(Intent::from_download_flag(Some("1")), Intent::View);
        assert_eq!(Intent::from_download_flag(None), Intent::View);
    }
}
