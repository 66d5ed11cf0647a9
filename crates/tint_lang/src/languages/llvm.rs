//! LLVM IR.

use std::sync::Arc;

use crate::definition::{LanguageBuilder, LanguageDefinition, LexerAttributes};
use crate::error::DefinitionError;
use crate::flags::{FoldFlags, LexerFlags};
use crate::keywords::KeywordLookup;
use crate::kind::{SubStyle, TokenKind};
use crate::style::StyleRule;
use crate::syntax::{Escape, EscapeForm, SigilRule};

const KEYWORDS: &str = "alias appending asm attributes available_externally comdat common constant \
datalayout declare define distinct extern_weak external false gc global ifunc internal linkonce \
linkonce_odr module none null partition poison prefix private section source_filename target triple \
true undef uselistorder uselistorder_bb weak weak_odr";

const TYPES: &str = "bfloat double float fp128 half i1 i128 i16 i32 i64 i8 label metadata opaque \
ppc_fp128 ptr token type void vscale x86_fp80 x86_mmx";

const ATTRIBUTES: &str = "acq_rel acquire addrspace( afn \
align align( alignstack alignstack( allocalign allockind( allocptr allocsize( alwaysinline any anyregcc arcp argmemonly \
atomic \
blockaddress( builtin byval byval( ccc cfguard_checkcc cold coldcc contract convergent cxx_fast_tlscc \
default denormal-fp-math denormal-fp-math-f32 dereferenceable( dereferenceable_or_null( \
disable_sanitizer_instrumentation dllexport dllimport dontcall-error dontcall-warn \
dso_local dso_local_equivalent dso_preemptable \
exact exactmatch fast fastcc fn_ret_thunk_extern frame-pointer hidden hot \
immarg inaccessiblemem_or_argmemonly inaccessiblememonly inalloca inbounds indirect-tls-seg-refs initialexec inlinehint \
inrange inreg inteldialect \
jumptable largest local_unnamed_addr localdynamic localexec min-legal-vector-width minsize monotonic mustprogress \
naked nest ninf nnan no-inline-line-tables no-jump-tables no-stack-arg-probe \
no_cfi no_sanitize_address no_sanitize_hwaddress noalias nobuiltin nocapture nocf_check noduplicate noduplicates nofree \
noimplicitfloat noinline nomerge nonlazybind nonnull norecurse noredzone noreturn \
nosanitize_bounds nosanitize_coverage nosync noundef nounwind nsw nsz null_pointer_is_valid nuw \
optforfuzzing optnone optsize \
patchable-function personality preallocated( preserve_allcc preserve_mostcc probe-stack prologue protected \
readnone readonly reassoc release returned returns_twice \
safestack samesize \
sanitize_address sanitize_address_dyninit sanitize_hwaddress sanitize_memory sanitize_memtag sanitize_thread seq_cst \
shadowcallstack sideeffect signext speculatable speculative_load_hardening sret ssp sspreq sspstrong \
stack-probe-size strictfp swiftasync swiftcc swifterror swiftself swifttailcc syncscope( \
tailcc thread_local( thunk unnamed_addr unordered uwtable vector-function-abi-variant volatile vscale_range( \
warn-stack-size webkit_jscc willreturn writeonly zeroext zeroinitializer";

const INSTRUCTIONS: &str = "add addrspacecast alloca and ashr atomicrmw bitcast br \
call callbr caller catch catchpad catchret catchswitch cleanup cleanuppad cleanupret cmpxchg \
eq extractelement extractvalue \
fadd fcmp fdiv fence filter fmax fmin fmul fneg fpext fptosi fptoui fptrunc freeze frem from fsub getelementptr \
icmp indirectbr insertelement insertvalue inttoptr invoke landingpad load lshr max min mul musttail nand ne notail \
oeq oge ogt ole olt one or ord phi ptrtoint resume ret \
sdiv select sext sge sgt shl shufflevector sitofp sle slt srem store sub switch tail to trunc \
udiv ueq uge ugt uitofp ule ult umax umin une uno unreachable unwind urem va_arg within xchg xor zext";

pub(super) fn definition() -> Result<Arc<LanguageDefinition>, DefinitionError> {
    builder().build()
}

fn builder() -> LanguageBuilder {
    LanguageDefinition::builder("LLVM IR")
        .extension("ll")
        .attributes(LexerAttributes {
            tab_width: 4,
            indent_width: 4,
            escape: Some(Escape {
                byte: b'\\',
                form: EscapeForm::HexPair,
            }),
            operator_kind: TokenKind::Operator,
            fold: FoldFlags::DELIMITERS | FoldFlags::BLOCK_COMMENT,
            flags: LexerFlags::NO_BLOCK_COMMENT | LexerFlags::SIGNED_NUMBERS | LexerFlags::LABELS,
        })
        .keywords(
            "keywords",
            TokenKind::Keyword,
            KeywordLookup::BinarySearch,
            KEYWORDS.split_whitespace(),
        )
        .keywords(
            "type",
            TokenKind::TypeKeyword,
            KeywordLookup::BinarySearch,
            TYPES.split_whitespace(),
        )
        .keywords(
            "attribute",
            TokenKind::Attribute,
            KeywordLookup::BinarySearch,
            ATTRIBUTES.split_whitespace(),
        )
        .keywords(
            "instruction",
            TokenKind::Instruction,
            KeywordLookup::BinarySearch,
            INSTRUCTIONS.split_whitespace(),
        )
        .style(StyleRule::new(TokenKind::Default, "Default", ""))
        .style(StyleRule::new(TokenKind::Keyword, "Keyword", "fore:#0000FF"))
        .style(StyleRule::new(TokenKind::TypeKeyword, "Type Keyword", "fore:#0000FF"))
        .style(StyleRule::new(TokenKind::Intrinsic, "Intrinsic", "bold; fore:#A46000"))
        .style(StyleRule::new(TokenKind::Instruction, "Instruction", "fore:#0080FF"))
        .style(StyleRule::new(TokenKind::Attribute, "Attribute", "fore:#FF8000").with_sub_styles(2))
        .style(StyleRule::new(TokenKind::Metadata, "Metadata", "fore:#FF8000").with_sub_styles(2))
        .style(StyleRule::new(TokenKind::Comdat, "COMDAT", "fore:#BB60D5"))
        .style(
            StyleRule::new(TokenKind::GlobalVariable, "Global Variable", "fore:#7C5AF3")
                .with_sub_styles(2),
        )
        .style(StyleRule::new(TokenKind::Variable, "Variable", "fore:#808000").with_sub_styles(2))
        .style(StyleRule::new(TokenKind::Function, "Function", "fore:#A46000"))
        .style(StyleRule::new(TokenKind::Type, "Type", "bold; fore:#007F7F"))
        .style(StyleRule::new(TokenKind::Comment, "Comment", "fore:#608060"))
        .style(StyleRule::new(TokenKind::String, "String", "fore:#008000"))
        .style(StyleRule::new(TokenKind::Escape, "Escape Sequence", "fore:#0080C0"))
        .style(StyleRule::new(TokenKind::Label, "Label", "back:#FFC040"))
        .style(StyleRule::new(TokenKind::Number, "Number", "fore:#FF0000"))
        .style(StyleRule::new(TokenKind::Operator, "Operator", "fore:#B000B0"))
        .line_comment(";")
        .quote('"')
        .operator_chars("=,*()[]{}<>:|+-")
        .operator("...")
        .fold_pair("{", "}")
        .ident_chars("._$-")
        .sigil(
            SigilRule::new('@', TokenKind::GlobalVariable)
                .quoted(SubStyle::ALT)
                .prefix("llvm.", TokenKind::Intrinsic)
                .call(TokenKind::Function),
        )
        .sigil(
            SigilRule::new('%', TokenKind::Variable)
                .quoted(SubStyle::ALT)
                .declaration("type", TokenKind::Type),
        )
        .sigil(
            SigilRule::new('!', TokenKind::Metadata)
                .quoted(SubStyle::ALT)
                .standalone(),
        )
        .sigil(SigilRule::new('#', TokenKind::Attribute).sub_style(SubStyle::ALT))
        .sigil(SigilRule::new('$', TokenKind::Comdat))
}
