/*!
Memory handling for data crossing the engine boundary.

Engine output buffers are held by a release-once guard while they are
copied out; key material copied out of them is wiped when dropped.
*/

pub mod key_material;
pub mod native_buffer;

pub use key_material::KeyMaterial;
pub use native_buffer::{libc_release, NativeBuffer, ReleaseFn};
