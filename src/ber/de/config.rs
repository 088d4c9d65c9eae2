use crate::ber::EncodingRules;

/// The default bound on constructed nesting during decode and
/// reconstruction.
pub const NESTING_LIMIT: usize = 5;

/// The options governing decode-side strictness.
#[derive(Clone, Copy, Debug)]
pub struct DecoderOptions {
    pub(crate) encoding_rules: EncodingRules,
    // limit decoding to prevent stack exhaustion on deep or hostile input
    pub(crate) nesting_limit: usize,
}

impl DecoderOptions {
    /// Return the default configuration for BER.
    #[must_use]
    pub const fn ber() -> Self {
        Self {
            encoding_rules: EncodingRules::Ber,
            nesting_limit: NESTING_LIMIT,
        }
    }

    /// Return the default configuration for CER.
    #[must_use]
    pub const fn cer() -> Self {
        Self {
            encoding_rules: EncodingRules::Cer,
            nesting_limit: NESTING_LIMIT,
        }
    }

    /// Return the default configuration for DER.
    #[must_use]
    pub const fn der() -> Self {
        Self {
            encoding_rules: EncodingRules::Der,
            nesting_limit: NESTING_LIMIT,
        }
    }

    /// Replaces the constructed nesting bound.
    #[must_use]
    pub const fn with_nesting_limit(mut self, limit: usize) -> Self {
        self.nesting_limit = limit;
        self
    }

    /// Returns the currently selected codec.
    #[must_use]
    pub fn current_codec(&self) -> crate::Codec {
        match self.encoding_rules {
            EncodingRules::Ber => crate::Codec::Ber,
            EncodingRules::Cer => crate::Codec::Cer,
            EncodingRules::Der => crate::Codec::Der,
        }
    }
}
