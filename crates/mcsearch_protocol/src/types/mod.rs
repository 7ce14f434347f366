pub mod primitives;
pub mod traits;
pub mod var_numbers;

pub use primitives::{ProtocolString, UnsignedShort};
pub use traits::{ProtocolRead, WriteToBytes};
pub use var_numbers::{MAX_VARINT_LEN, VarInt};
