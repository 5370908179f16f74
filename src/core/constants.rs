/*!
Constants for the SAFEcrypto session binding.

This module contains the configuration flag bit definitions, the engine's
return-code sentinels and the fixed sizes of the statistics record.
*/

/// Value returned by `verify` when a signature is valid
pub const VERIFY_VALID: i32 = 1;

/// Return code of a failed data-producing or key-loading call
pub const FUNC_FAILURE: i32 = 0;

/// Return code of a successful status call (`destroy`, `set_debug_level`,
/// `get_key_coding`); any other value is a failure
pub const FUNC_SUCCESS: i32 = 0;

/// Number of records the engine's error ring can hold before discarding
pub const MAX_ERROR_MESSAGES: usize = 8;

/// Configuration flag bits
pub mod flags {
    /// Continuation marker: a further 32-bit word of flags follows
    pub const MORE: u32 = 0x8000_0000;

    /// Disable all flags
    pub const NONE: u32 = 0x0000_0000;

    /// Word 0 bit definitions
    pub mod word0 {
        pub const ENTROPY_MASK: u32 = 0x0000_000F;
        pub const ENTROPY_BAC: u32 = 0x0000_0001;
        pub const ENTROPY_BAC_RLE: u32 = 0x0000_0002;
        pub const ENTROPY_STRONGSWAN: u32 = 0x0000_0004;
        pub const ENTROPY_HUFFMAN_STATIC: u32 = 0x0000_0008;

        pub const SAMPLE_BLINDING: u32 = 0x0000_0100;
        pub const SAMPLE_MASK: u32 = 0x0000_7E00;
        pub const SAMPLE_CDF: u32 = 0x0000_0200;
        pub const SAMPLE_KNUTH_YAO: u32 = 0x0000_0400;
        pub const SAMPLE_ZIGGURAT: u32 = 0x0000_0800;
        pub const SAMPLE_BAC: u32 = 0x0000_1000;
        pub const SAMPLE_HUFFMAN: u32 = 0x0000_2000;
        pub const SAMPLE_BERNOULLI: u32 = 0x0000_4000;

        pub const HASH_LENGTH_MASK: u32 = 0x0003_0000;
        pub const HASH_LENGTH_512: u32 = 0x0000_0000;
        pub const HASH_LENGTH_384: u32 = 0x0001_0000;
        pub const HASH_LENGTH_256: u32 = 0x0002_0000;
        pub const HASH_LENGTH_224: u32 = 0x0003_0000;

        pub const HASH_FUNCTION_MASK: u32 = 0x001C_0000;
        pub const HASH_FUNCTION_DEFAULT: u32 = 0x0000_0000;
        pub const HASH_BLAKE2: u32 = 0x0004_0000;
        pub const HASH_SHA2: u32 = 0x0008_0000;
        pub const HASH_SHA3: u32 = 0x000C_0000;
        pub const HASH_WHIRLPOOL: u32 = 0x0010_0000;

        pub const REDUCTION_MASK: u32 = 0x00E0_0000;
        pub const REDUCTION_DEFAULT: u32 = 0x0000_0000;
        pub const REDUCTION_REFERENCE: u32 = 0x0020_0000;
        pub const REDUCTION_BARRETT: u32 = 0x0040_0000;
        pub const REDUCTION_FP: u32 = 0x0060_0000;

        pub const THREADING_MASK: u32 = 0x7C00_0000;
        pub const THREADING_KEYGEN: u32 = 0x0400_0000;
        pub const THREADING_ENC_SIGN: u32 = 0x0800_0000;
        pub const THREADING_DEC_VERIFY: u32 = 0x1000_0000;
    }

    /// Word 1 bit definitions, only present when word 0 carries `MORE`
    pub mod word1 {
        pub const CSPRNG_MASK: u32 = 0x0015_553F;
        pub const CSPRNG_AES_CTR_DRBG: u32 = 0x0000_0001;
        pub const CSPRNG_CHACHA: u32 = 0x0000_0002;
        pub const CSPRNG_SALSA: u32 = 0x0000_0004;
        pub const CSPRNG_ISAAC: u32 = 0x0000_0008;
        pub const CSPRNG_KISS: u32 = 0x0000_0010;
        pub const CSPRNG_AES_CTR: u32 = 0x0000_0020;
        pub const CSPRNG_SHA3_512_DRBG: u32 = 0x0000_0100;
        pub const CSPRNG_SHA3_256_DRBG: u32 = 0x0000_0400;
        pub const CSPRNG_SHA2_512_DRBG: u32 = 0x0000_1000;
        pub const CSPRNG_SHA2_256_DRBG: u32 = 0x0000_4000;
        pub const CSPRNG_BLAKE2_512_DRBG: u32 = 0x0001_0000;
        pub const CSPRNG_BLAKE2_256_DRBG: u32 = 0x0004_0000;
        pub const CSPRNG_WHIRLPOOL_DRBG: u32 = 0x0010_0000;

        pub const ENTROPY_SOURCE_MASK: u32 = 0x0F00_0000;
        pub const USE_DEV_RANDOM: u32 = 0x0100_0000;
        pub const USE_DEV_URANDOM: u32 = 0x0200_0000;
        pub const USE_OS_RANDOM: u32 = 0x0400_0000;
        pub const USE_CALLBACK_RANDOM: u32 = 0x0800_0000;
    }
}

/// Size constants for the statistics record
pub mod sizes {
    /// Number of component categories tracked by the engine
    pub const STAT_COMPONENTS: usize = 6;

    /// Maximum number of coded sub-components per category
    pub const STAT_CODINGS: usize = 5;

    /// Fixed length of a coder name, including the NUL terminator
    pub const CODER_NAME_LEN: usize = 32;

    /// Width of a native `size_t`
    pub const WORD: usize = std::mem::size_of::<usize>();

    /// Number of `size_t` counters between the scheme and the component counts
    pub const STAT_COUNTERS: usize = 17;

    /// Size of one packed coding descriptor
    pub const CODING_RECORD: usize = 2 * WORD + CODER_NAME_LEN;

    /// Size of the packed statistics record
    pub const STATISTICS_RECORD: usize = 4
        + STAT_COUNTERS * WORD
        + STAT_COMPONENTS * WORD
        + STAT_COMPONENTS * STAT_CODINGS * CODING_RECORD;
}
