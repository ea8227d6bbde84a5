//! RTC privilege identifiers.
//!
//! Each privilege in a credential's privilege map is a 16-bit identifier
//! paired with its own expiration. The values below are fixed by Agora's
//! published scheme.

/// A privilege that an access token can grant, with its 16-bit wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum Privilege {
    /// Join a channel.
    JoinChannel = 1,
    /// Publish an audio stream.
    PublishAudioStream = 2,
    /// Publish a video stream.
    PublishVideoStream = 3,
    /// Publish a data stream.
    PublishDataStream = 4,
    /// Administrate the channel.
    AdministrateChannel = 101,
}

impl Privilege {
    /// The 16-bit wire value.
    pub fn wire_value(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_published_scheme() {
        assert_eq!(Privilege::JoinChannel.wire_value(), 1);
        assert_eq!(Privilege::PublishAudioStream.wire_value(), 2);
        assert_eq!(Privilege::PublishVideoStream.wire_value(), 3);
        assert_eq!(Privilege::PublishDataStream.wire_value(), 4);
        assert_eq!(Privilege::AdministrateChannel.wire_value(), 101);
    }

    #[test]
    fn ordering_follows_wire_value() {
        assert!(Privilege::JoinChannel < Privilege::PublishAudioStream);
        assert!(Privilege::PublishDataStream < Privilege::AdministrateChannel);
    }
}
