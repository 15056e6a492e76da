/// An opaque protobuf payload as it crossed the wire.
///
/// The schemas of the mocked write requests are owned by the upstream
/// protocol definitions; the harness captures their bytes without decoding
/// them. Tests that want typed assertions can round-trip through the prost
/// helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub data: Vec<u8>,
}

impl Message {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// The empty message, which is also the canned success response: both
    /// mocked contracts acknowledge writes with a zero-byte reply.
    pub fn empty() -> Self {
        Self { data: Vec::new() }
    }

    pub fn from_prost<T: prost::Message>(msg: &T) -> Self {
        Self {
            data: msg.encode_to_vec(),
        }
    }

    pub fn decode<T: prost::Message + Default>(&self) -> Result<T, prost::DecodeError> {
        T::decode(self.data.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Vec<u8>> for Message {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<Message> for Vec<u8> {
    fn from(msg: Message) -> Self {
        msg.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new() {
        let msg = Message::new(vec![1, 2, 3]);
        assert_eq!(msg.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_message_empty() {
        let msg = Message::empty();
        assert!(msg.is_empty());
    }

    #[test]
    fn test_message_from_vec() {
        let msg: Message = vec![1, 2, 3].into();
        assert_eq!(msg.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_message_into_vec() {
        let msg = Message::new(vec![1, 2, 3]);
        let data: Vec<u8> = msg.into();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn test_message_equality_by_value() {
        assert_eq!(Message::new(vec![9, 9]), Message::new(vec![9, 9]));
        assert_ne!(Message::new(vec![9, 9]), Message::empty());
    }
}
