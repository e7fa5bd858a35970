use strum::{Display, EnumIter, EnumString};

use crate::TargetGroup;

/// Every counter group understood by the pipeline. The pattern texts are a
/// contract with the simulators that produced the stats files: supporting a
/// new simulator means adding a group (or a new pattern shape), never
/// touching the pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GroupId {
    Brief,
    Ipc,
    Standard,
    Icache,
    Cache,
    Branch,
    Fetch,
    Packet,
    Model,
    Beta,
    XsIpc,
    XsBranch,
    #[strum(serialize = "xs-cache-nanhu12")]
    XsCacheNanhu12,
}

impl GroupId {
    pub fn group(self) -> TargetGroup {
        match self {
            Self::Brief => brief_targets(),
            Self::Ipc => ipc_targets(),
            Self::Standard => standard_targets(),
            Self::Icache => icache_targets(),
            Self::Cache => cache_targets(),
            Self::Branch => branch_targets(),
            Self::Fetch => fetch_targets(),
            Self::Packet => packet_targets(),
            Self::Model => model_targets(),
            Self::Beta => beta_targets(),
            Self::XsIpc => xs_ipc_targets(),
            Self::XsBranch => xs_branch_targets(),
            Self::XsCacheNanhu12 => xs_cache_targets_nanhu_12(),
        }
    }
}

pub fn brief_targets() -> TargetGroup {
    TargetGroup::positional(
        "brief",
        [
            r"(?:cpus?|switch_cpus_1)\.(ipc)",
            r"(?:cpus?|switch_cpus_1)\.committed(Insts)",
        ],
    )
}

pub fn ipc_targets() -> TargetGroup {
    TargetGroup::positional(
        "ipc",
        [
            r"(?:cpus?|switch_cpus_1)\.(ipc)",
            r"(?:cpus?|switch_cpus_1)\.(cpi)",
        ],
    )
}

pub fn standard_targets() -> TargetGroup {
    TargetGroup::positional(
        "standard",
        [
            r"(numCycles)",
            r"(?:cpus?|switch_cpus_1)?\.committed(Insts)",
            r"(?:cpus?|switch_cpus_1)?\.(ipc)",
        ],
    )
}

pub fn icache_targets() -> TargetGroup {
    TargetGroup::positional(
        "icache",
        [
            r"(icache\.demandMisses)::total",
            r"(icache\.overallAccesses)::total",
        ],
    )
}

pub fn cache_targets() -> TargetGroup {
    TargetGroup::positional(
        "cache",
        [
            r"(l3\.demandMisses)::total",
            r"(l3\.overallMisses)::total",
            r"(l2\.demandMisses)::total",
            r"(l2\.overallMisses)::total",
            r"cpu\.(dcache\.overallAccesses)::cpu\.data",
            r"(l2\.overallAccesses)::total",
            r"cpu\.(icache\.demandMisses)::total",
        ],
    )
}

pub fn branch_targets() -> TargetGroup {
    TargetGroup::positional(
        "branch",
        [
            r"(?:cpus?|switch_cpus_1)\.(?:diewxc|commit|iewx)\.(branchMispredicts)",
            r"(?:cpus?|switch_cpus_1)?\.(?:diewxc\.exec_|commit\.)(branches)",
            r"(?:cpus?|switch_cpus_1)?\.branchPred\.(indirectMispred)icted",
            r"(?:cpus?|switch_cpus_1)?\.branchPred\.(RASIncorrect)",
        ],
    )
}

pub fn fetch_targets() -> TargetGroup {
    TargetGroup::positional(
        "fetch",
        [
            r"cpus?\.fetch\.(fetchFromLoopBuffer)",
            r"cpus?\.(fetch\.rate) ",
        ],
    )
}

pub fn packet_targets() -> TargetGroup {
    TargetGroup::positional(
        "packet",
        [
            r"DQGroup0\.(KeySrcP)acket",
            r"DQGroup0\.(SrcOpP)ackets",
            r"DQGroup0\.(DestOpP)ackets",
            r"DQGroup0\.(MemP)ackets",
            r"DQGroup0\.(OrderP)ackets",
            r"DQGroup0\.(MiscP)ackets",
            r"DQGroup0\.(TotalP)ackets",
        ],
    )
}

pub fn model_targets() -> TargetGroup {
    TargetGroup::positional(
        "model",
        [
            r"cpus\.(ipc)",
            r"DQGroup(\d\.TotalPackets)",
            r"cpus\.committed(Insts)",
        ],
    )
}

pub fn beta_targets() -> TargetGroup {
    TargetGroup::positional(
        "beta",
        [
            r"cpus?\.(ipc)",
            r"cpus?\.committed(Insts)",
            r"(l2\.demand_miss)es::total",
            r"branchPred\.(condIncorrect)",
            r"branchPred\.(indirectMispredicted)",
            r"cpus?\.(dcache\.demand_misses)::total",
        ],
    )
}

pub fn xs_ipc_targets() -> TargetGroup {
    TargetGroup::keyed(
        "xs-ipc",
        [
            (
                "commitInstr",
                r"\[PERF \]\[time=\s+\d+\] TOP.SimTop.l_soc.core_with_l2.core.ctrlBlock.rob: commitInstr,\s+(\d+)",
            ),
            (
                "clock_cycle",
                r"\[PERF \]\[time=\s+\d+\] TOP.SimTop.l_soc.core_with_l2.core.ctrlBlock.rob: clock_cycle,\s+(\d+)",
            ),
        ],
    )
}

pub fn xs_branch_targets() -> TargetGroup {
    TargetGroup::keyed(
        "xs-branch",
        [
            (
                "BpInstr",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.core\.frontend\.ftq: BpInstr,\s+(\d+)",
            ),
            (
                "BpBWrong",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.core\.frontend\.ftq: BpBWrong,\s+(\d+)",
            ),
            (
                "BpJWrong",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.core\.frontend\.ftq: BpJWrong,\s+(\d+)",
            ),
            (
                "BpIWrong",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.core\.frontend\.ftq: BpIWrong,\s+(\d+)",
            ),
        ],
    )
}

pub fn xs_cache_targets_nanhu_12() -> TargetGroup {
    TargetGroup::keyed(
        "xs-cache-nanhu12",
        [
            (
                "l3b0_acc",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.l3cacheOpt\.slices_0\.directory: selfdir_A_req,\s+(\d+)",
            ),
            (
                "l3b1_acc",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.l3cacheOpt\.slices_1\.directory: selfdir_A_req,\s+(\d+)",
            ),
            (
                "l3b2_acc",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.l3cacheOpt\.slices_2\.directory: selfdir_A_req,\s+(\d+)",
            ),
            (
                "l3b3_acc",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.l3cacheOpt\.slices_3\.directory: selfdir_A_req,\s+(\d+)",
            ),
            (
                "l3b0_hit",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.l3cacheOpt\.slices_0\.directory: selfdir_A_hit,\s+(\d+)",
            ),
            (
                "l3b1_hit",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.l3cacheOpt\.slices_1\.directory: selfdir_A_hit,\s+(\d+)",
            ),
            (
                "l3b2_hit",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.l3cacheOpt\.slices_2\.directory: selfdir_A_hit,\s+(\d+)",
            ),
            (
                "l3b3_hit",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.l3cacheOpt\.slices_3\.directory: selfdir_A_hit,\s+(\d+)",
            ),
            (
                "l2b0_acc",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.l2cache\.slices_0\.directory: selfdir_A_req,\s+(\d+)",
            ),
            (
                "l2b1_acc",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.l2cache\.slices_1\.directory: selfdir_A_req,\s+(\d+)",
            ),
            (
                "l2b2_acc",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.l2cache\.slices_2\.directory: selfdir_A_req,\s+(\d+)",
            ),
            (
                "l2b3_acc",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.l2cache\.slices_3\.directory: selfdir_A_req,\s+(\d+)",
            ),
            (
                "l2b0_hit",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.l2cache\.slices_0\.directory: selfdir_A_hit,\s+(\d+)",
            ),
            (
                "l2b1_hit",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.l2cache\.slices_1\.directory: selfdir_A_hit,\s+(\d+)",
            ),
            (
                "l2b2_hit",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.l2cache\.slices_2\.directory: selfdir_A_hit,\s+(\d+)",
            ),
            (
                "l2b3_hit",
                r"\[PERF \]\[time=\s+\d+\] TOP\.SimTop\.l_soc\.core_with_l2\.l2cache\.slices_3\.directory: selfdir_A_hit,\s+(\d+)",
            ),
        ],
    )
}
