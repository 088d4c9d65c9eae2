use crate::ber::EncodingRules;

/// The length form emitted for constructed elements under BER, where the
/// rules leave the choice to the sender.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthForm {
    /// Definite lengths throughout.
    Definite,
    /// Indefinite lengths for constructed elements.
    Indefinite,
}

/// Options for configuring the [`Encoder`][super::Encoder].
#[derive(Clone, Copy, Debug)]
pub struct EncoderOptions {
    pub(crate) encoding_rules: EncodingRules,
    pub(crate) length_form: LengthForm,
}

impl EncoderOptions {
    /// Return the default configuration for BER.
    #[must_use]
    pub const fn ber() -> Self {
        Self {
            encoding_rules: EncodingRules::Ber,
            length_form: LengthForm::Definite,
        }
    }

    /// Return the default configuration for CER.
    #[must_use]
    pub const fn cer() -> Self {
        Self {
            encoding_rules: EncodingRules::Cer,
            length_form: LengthForm::Definite,
        }
    }

    /// Return the default configuration for DER.
    #[must_use]
    pub const fn der() -> Self {
        Self {
            encoding_rules: EncodingRules::Der,
            length_form: LengthForm::Definite,
        }
    }

    /// Replaces the BER length form preference. CER and DER fix their
    /// length forms and ignore this.
    #[must_use]
    pub const fn with_length_form(mut self, form: LengthForm) -> Self {
        self.length_form = form;
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
